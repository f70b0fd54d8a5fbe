use std::future::Future;

use super::{InstanceDeploymentInterface, InstanceDeployments};
use crate::Result;
use node_api::node::v1alpha1::{InstanceDeployment, Scale};
use node_core::params::GetParams;

/// Hand-written helpers on top of [`InstanceDeploymentInterface`]
///
/// Every helper is composed from interface calls, so anything implementing the
/// interface can opt in with an empty `impl`.
pub trait InstanceDeploymentExpansion: InstanceDeploymentInterface + Sync {
    /// [Get](InstanceDeploymentInterface::get) a named [`InstanceDeployment`] if it exists
    ///
    /// A `NotFound` status comes back as `Ok(None)`, every other error is returned,
    /// including a 404 that carries no apiserver status.
    fn get_opt(&self, name: &str) -> impl Future<Output = Result<Option<InstanceDeployment>>> + Send {
        async move {
            match self.get(name, &GetParams::default()).await {
                Ok(obj) => Ok(Some(obj)),
                Err(err) if err.is_not_found() => Ok(None),
                Err(err) => Err(err),
            }
        }
    }

    /// Set the desired replica count through the `scale` subresource
    ///
    /// The read `resourceVersion` is sent back, so a concurrent scale fails with
    /// a `409 Conflict` instead of being overwritten.
    fn scale_to(&self, name: &str, replicas: i32) -> impl Future<Output = Result<Scale>> + Send {
        async move {
            let mut scale = self.get_scale(name, &GetParams::default()).await?;
            tracing::debug!(name, from = scale.replicas(), to = replicas, "scaling");
            scale.spec.replicas = Some(replicas);
            self.update_scale(name, &scale).await
        }
    }
}

impl InstanceDeploymentExpansion for InstanceDeployments {}
