use std::future::Future;

use futures::stream::BoxStream;
use serde::Serialize;

use crate::{Client, Error, Result};
use node_api::node::v1alpha1::{InstanceDeployment, InstanceDeploymentList, Scale};
use node_core::{
    params::{DeleteParams, GetParams, ListParams, Patch, PatchParams, WatchParams},
    request::{self, Request},
    Resource, WatchEvent,
};

/// Has a method to work with [`InstanceDeployment`] resources
pub trait InstanceDeploymentsGetter {
    /// A typed accessor for `instancedeployments`
    fn instance_deployments(&self) -> InstanceDeployments;
}

/// Operations on `instancedeployments.node.sapcloud.io`
///
/// The resource is cluster scoped. Every method maps to exactly one request and
/// returns the server's representation, or the [`Error`] the request failed with.
pub trait InstanceDeploymentInterface {
    /// Create an [`InstanceDeployment`]
    fn create(&self, obj: &InstanceDeployment) -> impl Future<Output = Result<InstanceDeployment>> + Send;

    /// Replace an [`InstanceDeployment`] with `obj`
    ///
    /// `obj.metadata.name` selects the target and `obj.metadata.resourceVersion`,
    /// when set, guards against overwriting concurrent changes.
    fn update(&self, obj: &InstanceDeployment) -> impl Future<Output = Result<InstanceDeployment>> + Send;

    /// Replace the `status` subresource of an [`InstanceDeployment`]
    ///
    /// Changes outside of `.status` are ignored by the server.
    fn update_status(
        &self,
        obj: &InstanceDeployment,
    ) -> impl Future<Output = Result<InstanceDeployment>> + Send;

    /// Delete a named [`InstanceDeployment`]
    fn delete(&self, name: &str, dp: &DeleteParams) -> impl Future<Output = Result<()>> + Send;

    /// Delete every [`InstanceDeployment`] matching `lp`
    fn delete_collection(
        &self,
        dp: &DeleteParams,
        lp: &ListParams,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Get a named [`InstanceDeployment`]
    fn get(&self, name: &str, gp: &GetParams) -> impl Future<Output = Result<InstanceDeployment>> + Send;

    /// List [`InstanceDeployment`]s matching `lp`
    fn list(&self, lp: &ListParams) -> impl Future<Output = Result<InstanceDeploymentList>> + Send;

    /// Watch [`InstanceDeployment`]s from `version` on
    ///
    /// Use `"0"` to start from any version, or the `resourceVersion` of a previous list.
    /// The stream ends when the server closes the watch, see [`WatchParams::timeout`].
    fn watch(
        &self,
        wp: &WatchParams,
        version: &str,
    ) -> impl Future<Output = Result<BoxStream<'static, Result<WatchEvent<InstanceDeployment>>>>> + Send;

    /// Patch a named [`InstanceDeployment`]
    fn patch<P: Serialize + Sync>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> impl Future<Output = Result<InstanceDeployment>> + Send;

    /// Patch a subresource, e.g. `status`, of a named [`InstanceDeployment`]
    fn patch_subresource<P: Serialize + Sync>(
        &self,
        subresource: &str,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> impl Future<Output = Result<InstanceDeployment>> + Send;

    /// Get the `scale` subresource of a named [`InstanceDeployment`]
    fn get_scale(&self, name: &str, gp: &GetParams) -> impl Future<Output = Result<Scale>> + Send;

    /// Replace the `scale` subresource of a named [`InstanceDeployment`]
    fn update_scale(&self, name: &str, scale: &Scale) -> impl Future<Output = Result<Scale>> + Send;
}

/// Typed accessor for `instancedeployments`, see [`InstanceDeploymentInterface`]
#[derive(Clone)]
pub struct InstanceDeployments {
    client: Client,
}

impl InstanceDeployments {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn request() -> Request {
        Request::new(InstanceDeployment::url_path(None))
    }
}

fn name_of(obj: &InstanceDeployment) -> Result<&str> {
    obj.name().ok_or_else(|| {
        Error::BuildRequest(request::Error::Validation(
            "resource name may not be empty".into(),
        ))
    })
}

fn to_body<T: Serialize>(obj: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(obj).map_err(|e| Error::BuildRequest(request::Error::SerializeBody(e)))
}

impl InstanceDeploymentInterface for InstanceDeployments {
    async fn create(&self, obj: &InstanceDeployment) -> Result<InstanceDeployment> {
        let mut req = Self::request().create(to_body(obj)?).map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("create");
        self.client.request::<InstanceDeployment>(req).await
    }

    async fn update(&self, obj: &InstanceDeployment) -> Result<InstanceDeployment> {
        let mut req = Self::request()
            .replace(name_of(obj)?, to_body(obj)?)
            .map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("update");
        self.client.request::<InstanceDeployment>(req).await
    }

    async fn update_status(&self, obj: &InstanceDeployment) -> Result<InstanceDeployment> {
        let mut req = Self::request()
            .replace_subresource("status", name_of(obj)?, to_body(obj)?)
            .map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("update_status");
        self.client.request::<InstanceDeployment>(req).await
    }

    async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<()> {
        let mut req = Self::request().delete(name, dp).map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("delete");
        // The server answers with the object or a Status depending on the finalizers; neither is needed.
        self.client.request_text(req).await?;
        Ok(())
    }

    async fn delete_collection(&self, dp: &DeleteParams, lp: &ListParams) -> Result<()> {
        let mut req = Self::request()
            .delete_collection(dp, lp)
            .map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("delete_collection");
        self.client.request_text(req).await?;
        Ok(())
    }

    async fn get(&self, name: &str, gp: &GetParams) -> Result<InstanceDeployment> {
        let mut req = Self::request().get(name, gp).map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("get");
        self.client.request::<InstanceDeployment>(req).await
    }

    async fn list(&self, lp: &ListParams) -> Result<InstanceDeploymentList> {
        let mut req = Self::request().list(lp).map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("list");
        self.client.request::<InstanceDeploymentList>(req).await
    }

    async fn watch(
        &self,
        wp: &WatchParams,
        version: &str,
    ) -> Result<BoxStream<'static, Result<WatchEvent<InstanceDeployment>>>> {
        let mut req = Self::request().watch(wp, version).map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("watch");
        self.client.request_events::<InstanceDeployment>(req).await
    }

    async fn patch<P: Serialize + Sync>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<InstanceDeployment> {
        let mut req = Self::request().patch(name, pp, patch).map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("patch");
        self.client.request::<InstanceDeployment>(req).await
    }

    async fn patch_subresource<P: Serialize + Sync>(
        &self,
        subresource: &str,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> Result<InstanceDeployment> {
        let mut req = Self::request()
            .patch_subresource(subresource, name, pp, patch)
            .map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("patch_subresource");
        self.client.request::<InstanceDeployment>(req).await
    }

    async fn get_scale(&self, name: &str, gp: &GetParams) -> Result<Scale> {
        let mut req = Self::request()
            .get_subresource("scale", name, gp)
            .map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("get_scale");
        self.client.request::<Scale>(req).await
    }

    async fn update_scale(&self, name: &str, scale: &Scale) -> Result<Scale> {
        let mut req = Self::request()
            .replace_subresource("scale", name, to_body(scale)?)
            .map_err(Error::BuildRequest)?;
        req.extensions_mut().insert("update_scale");
        self.client.request::<Scale>(req).await
    }
}
