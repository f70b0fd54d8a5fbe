//! A generic REST client for the api server
//!
//! The [`Client`] sends fully built [`http::Request`]s through a [`tower::Service`] stack
//! and decodes the responses. It knows nothing about particular resources, the typed
//! accessors in [`clientset`](crate::clientset) build requests with [`node_core::Request`]
//! and hand them to the client.
use futures::{future::BoxFuture, stream::BoxStream, StreamExt, TryStreamExt};
use http::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::{
    codec::{FramedRead, LinesCodec, LinesCodecError},
    io::StreamReader,
};
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{error::ErrorResponse, Error, Result};
use node_core::WatchEvent;

mod body;
// Add `into_stream()` to `http::Body`
use body::IntoBodyDataStream;
pub use body::Body;

mod builder;
pub use builder::{ClientBuilder, DynBody, GenericService};

pub mod middleware;

/// Client for connecting with the api server.
///
/// Cheap to clone; clones share the underlying service.
#[derive(Clone)]
pub struct Client {
    // - `Buffer` for cheap clone
    // - `BoxService` for dynamic response future type
    inner: Buffer<Request<Body>, BoxFuture<'static, Result<Response<Body>, BoxError>>>,
}

impl Client {
    /// Create a [`Client`] using a custom `Service` stack.
    ///
    /// To create with the default stack with a [`Config`](crate::Config), use
    /// [`Client::try_from`].
    ///
    /// Must be called from within a tokio runtime, the buffer spawns a worker task.
    pub fn new<S, B>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = bytes::Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        // Transform response body to `Body` and use type erased error to avoid type parameters.
        let service = MapResponseBodyLayer::new(Body::wrap_body)
            .layer(service)
            .map_err(|e| e.into());
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
        }
    }

    /// Perform a raw HTTP request against the API and return the raw response back.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let mut svc = self.inner.clone();
        let res = svc
            .ready()
            .await
            .map_err(Error::Service)?
            .call(request)
            .await
            .map_err(|err| {
                // Error decorating request
                err.downcast::<Error>()
                    .map(|e| *e)
                    // Error requesting
                    .or_else(|err| {
                        err.downcast::<hyper_util::client::legacy::Error>()
                            .map(|err| Error::HyperError(*err))
                    })
                    // Error from another middleware
                    .unwrap_or_else(Error::Service)
            })?;
        Ok(res)
    }

    /// Perform a raw HTTP request against the API and deserialize the response
    /// as JSON to some known type.
    pub async fn request<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.request_text(request).await?;

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("{}, {:?}", text, e);
            Error::SerdeError(e)
        })
    }

    /// Perform a raw HTTP request against the API and get back the response
    /// as a string
    ///
    /// Error statuses come back as [`Error::Api`].
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        let body_bytes = res.into_body().collect_bytes().await?;
        let text = String::from_utf8(body_bytes.to_vec()).map_err(Error::FromUtf8)?;
        handle_api_errors(&text, status)?;

        Ok(text)
    }

    /// Perform a raw request and get back a stream of [`WatchEvent`] objects
    ///
    /// The response is read as newline delimited json. A line that is a bare
    /// `Status` rather than an event surfaces as [`Error::Api`].
    pub async fn request_events<T>(
        &self,
        request: Request<Vec<u8>>,
    ) -> Result<BoxStream<'static, Result<WatchEvent<T>>>>
    where
        T: Clone + DeserializeOwned + Send + 'static,
    {
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        tracing::trace!("headers: {:?}", res.headers());
        if status.is_client_error() || status.is_server_error() {
            let text = String::from_utf8(res.into_body().collect_bytes().await?.to_vec())
                .map_err(Error::FromUtf8)?;
            return Err(api_error(&text, status));
        }

        let frames = FramedRead::new(
            StreamReader::new(res.into_body().into_stream().map_err(|e| {
                // Unexpected EOF from chunked decoder.
                // Tends to happen when watching for 300+s. This will be ignored.
                if e.to_string().contains("unexpected EOF during chunk") {
                    return std::io::Error::new(std::io::ErrorKind::UnexpectedEof, e);
                }
                std::io::Error::other(e)
            })),
            LinesCodec::new(),
        );

        Ok(frames
            .filter_map(|res| async move {
                match res {
                    Ok(line) if line.trim().is_empty() => None,
                    Ok(line) => match serde_json::from_str::<WatchEvent<T>>(&line) {
                        Ok(event) => Some(Ok(event)),
                        Err(e) => {
                            // Ignore EOF error that can happen for incomplete line from `decode_eof`.
                            if e.is_eof() {
                                return None;
                            }

                            // Got general error response
                            if let Ok(e_resp) = serde_json::from_str::<ErrorResponse>(&line) {
                                return Some(Err(Error::Api(e_resp)));
                            }
                            // Parsing error
                            Some(Err(Error::SerdeError(e)))
                        }
                    },

                    Err(LinesCodecError::Io(e)) => match e.kind() {
                        // Client timeout
                        std::io::ErrorKind::TimedOut => {
                            tracing::warn!("timeout in poll: {}", e);
                            None
                        }
                        // Unexpected EOF from chunked decoder.
                        std::io::ErrorKind::UnexpectedEof => {
                            tracing::warn!("eof in poll: {}", e);
                            None
                        }
                        _ => Some(Err(Error::ReadEvents(e))),
                    },

                    // Reached the maximum line length without finding a newline.
                    // This should never happen because we're using the default `usize::MAX`.
                    Err(LinesCodecError::MaxLineLengthExceeded) => {
                        Some(Err(Error::LinesCodecMaxLineLengthExceeded))
                    }
                }
            })
            .boxed())
    }
}

/// Api server returned error handling
///
/// Either the server returned an explicit `Status`,
/// or it somehow returned something we couldn't parse as one.
///
/// In either case, present an ApiError upstream.
fn handle_api_errors(text: &str, s: StatusCode) -> Result<()> {
    if s.is_client_error() || s.is_server_error() {
        Err(api_error(text, s))
    } else {
        Ok(())
    }
}

fn api_error(text: &str, s: StatusCode) -> Error {
    if let Ok(errdata) = serde_json::from_str::<ErrorResponse>(text) {
        tracing::debug!("Unsuccessful: {:?}", errdata);
        Error::Api(errdata)
    } else {
        tracing::warn!("Unsuccessful data error parse: {}", text);
        let ae = ErrorResponse {
            status: s.to_string(),
            code: s.as_u16(),
            message: format!("{text:?}"),
            reason: "Failed to parse error data".into(),
            details: None,
        };
        tracing::debug!("Unsuccessful: {:?} (reconstruct)", ae);
        Error::Api(ae)
    }
}

impl TryFrom<crate::Config> for Client {
    type Error = Error;

    /// Builds a default [`Client`] from a [`Config`](crate::Config), see [`ClientBuilder`] if more customization is required
    fn try_from(config: crate::Config) -> Result<Self> {
        Ok(ClientBuilder::try_from(config)?.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::pin_mut;
    use http_body_util::StreamBody;
    use tower_test::mock;

    #[tokio::test]
    async fn request_decodes_json() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (request, send) = handle.next_request().await.expect("service not called");
            assert_eq!(request.method(), http::Method::GET);
            assert_eq!(request.uri().to_string(), "/version");
            send.send_response(
                Response::builder()
                    .body(Body::from(r#"{"major":"1","minor":"30"}"#))
                    .unwrap(),
            );
        });

        let client = Client::new(mock_service);
        let v: serde_json::Value = client
            .request(Request::get("/version").body(vec![]).unwrap())
            .await
            .unwrap();
        assert_eq!(v["minor"], "30");
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (_, send) = handle.next_request().await.expect("service not called");
            send.send_response(
                Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Body::from(
                        r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"instancedeployments.node.sapcloud.io \"web\" not found","reason":"NotFound","details":{"name":"web","group":"node.sapcloud.io","kind":"instancedeployments"},"code":404}"#,
                    ))
                    .unwrap(),
            );
            let (_, send) = handle.next_request().await.expect("service not called");
            send.send_response(
                Response::builder()
                    .status(StatusCode::BAD_GATEWAY)
                    .body(Body::from("upstream gone"))
                    .unwrap(),
            );
        });

        let client = Client::new(mock_service);
        let err = client
            .request_text(Request::get("/x").body(vec![]).unwrap())
            .await
            .unwrap_err();
        match err {
            Error::Api(e) => {
                assert!(e.is_not_found());
                assert_eq!(e.details.unwrap().name.as_deref(), Some("web"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = client
            .request_text(Request::get("/x").body(vec![]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(e) if e.code == 502 && e.reason == "Failed to parse error data"));
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn service_errors_are_passed_through() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (_, send) = handle.next_request().await.expect("service not called");
            send.send_error(std::io::Error::other("connection refused"));
        });

        let client = Client::new(mock_service);
        let err = client
            .request_text(Request::get("/x").body(vec![]).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Service(e) if e.to_string() == "connection refused"));
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn request_events_splits_lines() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (_, send) = handle.next_request().await.expect("service not called");
            // One event split over two chunks, then an expired Status line.
            let chunks = futures::stream::iter(vec![
                Ok::<_, std::io::Error>(http_body::Frame::data(bytes::Bytes::from_static(
                    br#"{"type":"ADDED","object":{"metadata":{"na"#,
                ))),
                Ok(http_body::Frame::data(bytes::Bytes::from_static(
                    b"me\":\"a\"}}}\n\n{\"type\":\"DELETED\",\"object\":{\"metadata\":{\"name\":\"a\"}}}\n",
                ))),
                Ok(http_body::Frame::data(bytes::Bytes::from_static(
                    br#"{"kind":"Status","status":"Failure","message":"too old resource version","reason":"Expired","code":410}"#,
                ))),
            ]);
            send.send_response(Response::new(Body::wrap_body(StreamBody::new(chunks))));
        });

        let client = Client::new(mock_service);
        let stream = client
            .request_events::<serde_json::Value>(Request::get("/w").body(vec![]).unwrap())
            .await
            .unwrap();
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], Ok(WatchEvent::Added(o)) if o["metadata"]["name"] == "a"));
        assert!(matches!(&events[1], Ok(WatchEvent::Deleted(_))));
        assert!(matches!(&events[2], Err(Error::Api(e)) if e.code == 410));
        spawned.await.unwrap();
    }

    #[tokio::test]
    async fn request_events_fails_on_error_status() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            let (_, send) = handle.next_request().await.expect("service not called");
            send.send_response(
                Response::builder()
                    .status(StatusCode::FORBIDDEN)
                    .body(Body::from(
                        r#"{"status":"Failure","message":"forbidden","reason":"Forbidden","code":403}"#,
                    ))
                    .unwrap(),
            );
        });

        let client = Client::new(mock_service);
        let res = client
            .request_events::<serde_json::Value>(Request::get("/w").body(vec![]).unwrap())
            .await;
        assert!(matches!(res, Err(Error::Api(e)) if e.reason == "Forbidden"));
        spawned.await.unwrap();
    }
}
