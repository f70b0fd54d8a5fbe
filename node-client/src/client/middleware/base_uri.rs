//! Make requests relative to the cluster url.
use http::{uri, Request};
use tower::{Layer, Service};

/// Layer that applies [`BaseUri`] which makes all requests relative to the URI.
///
/// Path in the base URI is preserved, so a proxy prefix like `/k8s/clusters/c-1` keeps working.
#[derive(Debug, Clone)]
pub struct BaseUriLayer {
    base_uri: http::Uri,
}

impl BaseUriLayer {
    /// Set base URI of requests.
    pub fn new(base_uri: http::Uri) -> Self {
        Self { base_uri }
    }
}

impl<S> Layer<S> for BaseUriLayer {
    type Service = BaseUri<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BaseUri {
            base_uri: self.base_uri.clone(),
            inner,
        }
    }
}

/// Middleware that sets base URI so that all requests are relative to it.
#[derive(Debug, Clone)]
pub struct BaseUri<S> {
    base_uri: http::Uri,
    inner: S,
}

impl<S, ReqBody> Service<Request<ReqBody>> for BaseUri<S>
where
    S: Service<Request<ReqBody>>,
{
    type Error = S::Error;
    type Future = S::Future;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let (mut parts, body) = req.into_parts();
        parts.uri = join(&self.base_uri, parts.uri.path_and_query());
        self.inner.call(Request::from_parts(parts, body))
    }
}

fn join(base_uri: &http::Uri, req_pandq: Option<&uri::PathAndQuery>) -> http::Uri {
    let mut parts = base_uri.clone().into_parts();
    let base_path = base_uri.path().trim_end_matches('/');
    let pandq = match req_pandq {
        // `PathAndQuery` always starts with a slash.
        Some(req) => format!("{base_path}{req}"),
        None => base_uri.path().to_string(),
    };
    parts.path_and_query = pandq.parse().ok();
    // Scheme, authority and a valid path joined to another valid path stay a valid uri.
    http::Uri::from_parts(parts).unwrap_or_else(|_| base_uri.clone())
}
