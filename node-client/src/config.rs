//! Connection settings for the default client stack
//!
//! Authentication and TLS are not handled here. The default stack speaks plain http,
//! which is what `kubectl proxy` offers locally. Add your own layers through
//! [`ClientBuilder::with_layer`](crate::ClientBuilder::with_layer) for anything else.
use std::time::Duration;

use http::{header::HeaderName, HeaderValue};

use crate::{client::middleware::ExtraHeadersLayer, Error, Result};

/// Environment variable read by [`Config::infer`]
pub const CLUSTER_URL_ENV: &str = "NODE_CLUSTER_URL";

/// Where `kubectl proxy` listens by default
pub const DEFAULT_CLUSTER_URL: &str = "http://127.0.0.1:8001";

// Default timeout for reads from the server. Watches close server side before this.
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(295);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration object used to build the default [`Client`](crate::Client) stack
#[derive(Debug, Clone)]
pub struct Config {
    /// The configured cluster url
    pub cluster_url: http::Uri,
    /// Timeout for establishing a connection. `None` means no timeout.
    pub connect_timeout: Option<Duration>,
    /// Timeout for reading from an established connection. `None` means no timeout.
    ///
    /// Keep this above the watch timeout or long running watches get cut short.
    pub read_timeout: Option<Duration>,
    /// Timeout for writing to an established connection. `None` means no timeout.
    pub write_timeout: Option<Duration>,
    /// Headers sent with every request, e.g. a `User-Agent`
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl Config {
    /// Construct a new config where only the `cluster_url` is set by the user
    /// and everything else receives a default value.
    pub fn new(cluster_url: http::Uri) -> Self {
        Self {
            cluster_url,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            write_timeout: None,
            headers: Vec::new(),
        }
    }

    /// Infer the configuration from the environment
    ///
    /// Uses `NODE_CLUSTER_URL` when set, otherwise the local `kubectl proxy` address.
    pub fn infer() -> Result<Self> {
        let url = match std::env::var(CLUSTER_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                tracing::trace!("{CLUSTER_URL_ENV} unset, using {DEFAULT_CLUSTER_URL}");
                DEFAULT_CLUSTER_URL.to_string()
            }
        };
        Self::from_url(url.trim())
    }

    /// Parse `url` and build a config from it
    pub fn from_url(url: &str) -> Result<Self> {
        let cluster_url = url.parse::<http::Uri>().map_err(Error::InvalidUri)?;
        Ok(Self::new(cluster_url))
    }

    /// Add a header sent with every request
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidHeader {
            name: name.to_string(),
            reason,
        };
        let header_name = HeaderName::try_from(name).map_err(|e| invalid(e.to_string()))?;
        let header_value = HeaderValue::try_from(value).map_err(|e| invalid(e.to_string()))?;
        self.headers.push((header_name, header_value));
        Ok(self)
    }

    pub(crate) fn extra_headers_layer(&self) -> ExtraHeadersLayer {
        ExtraHeadersLayer::new(self.headers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let config = Config::new(http::Uri::from_static("http://localhost:8001"));
        assert_eq!(config.read_timeout, Some(Duration::from_secs(295)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(30)));
        assert!(config.write_timeout.is_none());
        assert!(config.headers.is_empty());
    }

    #[test]
    fn from_url_rejects_garbage() {
        assert!(matches!(Config::from_url("http://bad host"), Err(Error::InvalidUri(_))));
        let config = Config::from_url("https://10.0.0.1:6443").unwrap();
        assert_eq!(config.cluster_url.host(), Some("10.0.0.1"));
    }

    #[test]
    fn headers_are_validated() {
        let config = Config::new(http::Uri::from_static("http://localhost"))
            .header("user-agent", "node-client")
            .unwrap();
        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.headers[0].0, http::header::USER_AGENT);

        let err = Config::new(http::Uri::from_static("http://localhost"))
            .header("bad header", "x")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { name, .. } if name == "bad header"));
    }
}
