//! API types served under the `node.sapcloud.io` group
//!
//! The types are plain serde structs; request building lives in `node-core`
//! and the typed client in `node-client`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod node;
