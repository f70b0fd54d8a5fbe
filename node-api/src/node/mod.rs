//! The `node.sapcloud.io` api group
pub mod v1alpha1;

/// The api group name
pub const GROUP: &str = "node.sapcloud.io";
