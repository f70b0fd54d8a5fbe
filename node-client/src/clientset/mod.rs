//! Typed clients for the `node.sapcloud.io/v1alpha1` group
//!
//! [`NodeV1alpha1Client`] owns the REST [`Client`] and hands out one typed
//! accessor per resource through the `*Getter` traits.
mod expansion;
mod instance_deployment;

pub use expansion::InstanceDeploymentExpansion;
pub use instance_deployment::{InstanceDeploymentInterface, InstanceDeployments, InstanceDeploymentsGetter};

use crate::{Client, Config, Error};

/// Client for the `node.sapcloud.io/v1alpha1` api group
#[derive(Clone)]
pub struct NodeV1alpha1Client {
    client: Client,
}

impl NodeV1alpha1Client {
    /// Wrap an existing REST client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The REST client shared by every accessor of this group
    pub fn rest_client(&self) -> &Client {
        &self.client
    }
}

impl TryFrom<Config> for NodeV1alpha1Client {
    type Error = Error;

    /// Builds the group client on the default stack, see [`ClientBuilder`](crate::ClientBuilder) to customize it
    fn try_from(config: Config) -> Result<Self, Error> {
        Client::try_from(config).map(Self::new)
    }
}

impl From<Client> for NodeV1alpha1Client {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

impl InstanceDeploymentsGetter for NodeV1alpha1Client {
    fn instance_deployments(&self) -> InstanceDeployments {
        InstanceDeployments::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Body;
    use futures::pin_mut;
    use http::{Request, Response};
    use node_core::params::ListParams;
    use tower_test::mock;

    #[tokio::test]
    async fn accessors_share_the_rest_client() {
        let (mock_service, handle) = mock::pair::<Request<Body>, Response<Body>>();
        let spawned = tokio::spawn(async move {
            pin_mut!(handle);
            for _ in 0..2 {
                let (request, send) = handle.next_request().await.expect("service not called");
                assert_eq!(
                    request.uri().to_string(),
                    "/apis/node.sapcloud.io/v1alpha1/instancedeployments"
                );
                send.send_response(Response::new(Body::from(r#"{"metadata":{},"items":[]}"#)));
            }
        });

        let node = NodeV1alpha1Client::new(Client::new(mock_service));
        let first = node.instance_deployments();
        let second = NodeV1alpha1Client::from(node.rest_client().clone()).instance_deployments();
        assert!(first.list(&ListParams::default()).await.unwrap().items.is_empty());
        assert!(second.list(&ListParams::default()).await.unwrap().items.is_empty());
        spawned.await.unwrap();
    }
}
