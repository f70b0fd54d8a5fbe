use tracing::*;

use node_client::{clientset::*, Config};
use node_core::params::GetParams;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let name = std::env::args().nth(1).unwrap_or_else(|| "demo-workers".into());
    let replicas: i32 = std::env::args().nth(2).map(|r| r.parse()).transpose()?.unwrap_or(2);

    let node = NodeV1alpha1Client::try_from(Config::infer()?)?;
    let ids = node.instance_deployments();

    let before = ids.get_scale(&name, &GetParams::default()).await?;
    info!(
        "{} wants {} replicas, has {}",
        name,
        before.replicas(),
        before.status.as_ref().map(|s| s.replicas).unwrap_or_default()
    );

    let after = ids.scale_to(&name, replicas).await?;
    info!("{} now wants {} replicas", name, after.replicas());
    Ok(())
}
