//! Version `v1alpha1` of the `node.sapcloud.io` group
mod instance_deployment;
pub use instance_deployment::{
    ClassSpec, InstanceDeployment, InstanceDeploymentCondition, InstanceDeploymentList,
    InstanceDeploymentSpec, InstanceDeploymentStatus, InstanceDeploymentStrategy,
    InstanceDeploymentStrategyType, InstanceSpec, InstanceTemplateSpec, RollbackConfig,
    RollingUpdateInstanceDeployment,
};

mod scale;
pub use scale::{Scale, ScaleSpec, ScaleStatus};

/// The api version within [`GROUP`](super::GROUP)
pub const VERSION: &str = "v1alpha1";

/// `apiVersion` of every object in this version
pub const API_VERSION: &str = "node.sapcloud.io/v1alpha1";
