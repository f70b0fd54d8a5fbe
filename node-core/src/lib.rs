//! Types and request builders for talking to the `node.sapcloud.io` API without a client
//!
//! Everything here is pure: a [`Request`] turns parameters into an [`http::Request`],
//! and the remaining modules describe what goes over the wire.
//! The transport lives in `node-client`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod metadata;

pub mod object;
pub use object::ObjectList;

pub mod params;

pub mod request;
pub use request::Request;

mod resource;
pub use resource::Resource;

pub mod watch;
pub use watch::WatchEvent;

mod error;
pub use error::{ErrorResponse, StatusCause, StatusDetails};
