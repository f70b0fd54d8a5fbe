use serde_json::json;
use tracing::*;

use node_api::node::v1alpha1::InstanceDeployment;
use node_client::{clientset::*, Config, Error};
use node_core::{
    params::{DeleteParams, GetParams, ListParams, Patch, PatchParams},
    Resource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let node = NodeV1alpha1Client::try_from(Config::infer()?)?;
    let ids = node.instance_deployments();

    let id: InstanceDeployment = serde_yaml::from_str(include_str!("instancedeployment.yaml"))?;
    let name = id.name().unwrap_or("demo-workers").to_string();

    // Create, tolerating leftovers from a previous run
    match ids.create(&id).await {
        Ok(o) => info!("Created {} at {:?}", name, o.resource_version()),
        Err(Error::Api(ae)) if ae.code == 409 => info!("{} already exists", name),
        Err(e) => return Err(e.into()),
    }

    // Read it back
    let mut current = ids.get(&name, &GetParams::default()).await?;
    info!("Got {} with {:?} replicas", name, current.spec.replicas);

    // Replace the spec, guarded by the resourceVersion we just read
    current.spec.min_ready_seconds = Some(60);
    let replaced = ids.update(&current).await?;
    info!("Replaced {}: minReadySeconds={:?}", name, replaced.spec.min_ready_seconds);

    // Pause the rollout with a merge patch
    let patch = json!({ "spec": { "paused": true } });
    let patched = ids.patch(&name, &PatchParams::default(), &Patch::Merge(&patch)).await?;
    assert!(patched.spec.paused);
    info!("Paused {}", name);

    // List everything in the pool
    let lp = ListParams::default().labels("pool=demo-workers");
    for o in ids.list(&lp).await? {
        info!("Found {} (generation {:?})", o.name().unwrap_or_default(), o.metadata.generation);
    }

    // Clean up
    ids.delete(&name, &DeleteParams::background()).await?;
    info!("Deleted {}", name);
    if ids.get_opt(&name).await?.is_some() {
        info!("{} is still finalizing", name);
    }
    Ok(())
}
