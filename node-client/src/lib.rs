//! Typed clientset for the `node.sapcloud.io/v1alpha1` API group
//!
//! The crate is split in three layers:
//! - [`Client`]: a generic REST client over a [`tower::Service`], responsible for
//!   sending requests and decoding responses and watch streams
//! - [`Config`] and [`ClientBuilder`]: the default transport stack
//! - [`clientset`]: the typed [`InstanceDeployments`](clientset::InstanceDeployments) accessor
//!
//! ```no_run
//! use node_client::{clientset::*, Config};
//! use node_client::core::params::GetParams;
//!
//! # async fn wrapper() -> Result<(), Box<dyn std::error::Error>> {
//! let node = NodeV1alpha1Client::try_from(Config::infer()?)?;
//! let ids = node.instance_deployments();
//! let web = ids.get("web", &GetParams::default()).await?;
//! println!("web wants {:?} replicas", web.spec.replicas);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod client;
pub use client::{Client, ClientBuilder};

pub mod clientset;

pub mod config;
pub use config::Config;

pub mod error;
pub use error::Error;

/// Convient alias for `Result<T, Error>`
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub use node_api as api;
pub use node_core as core;
