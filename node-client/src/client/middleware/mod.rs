//! Middleware used by the default [`ClientBuilder`](crate::ClientBuilder) stack
mod base_uri;
mod extra_headers;

pub use base_uri::{BaseUri, BaseUriLayer};
pub use extra_headers::{ExtraHeaders, ExtraHeadersLayer};
