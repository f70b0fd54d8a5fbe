use futures::TryStreamExt;
use tracing::*;

use node_client::{clientset::*, Config, Error};
use node_core::{
    params::{ListParams, WatchParams},
    Resource, WatchEvent,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let node = NodeV1alpha1Client::try_from(Config::infer()?)?;
    let ids = node.instance_deployments();

    // Start from the version of a fresh list, then resume from bookmarks
    let list = ids.list(&ListParams::default()).await?;
    let mut version = list.metadata.resource_version.clone().unwrap_or_else(|| "0".into());
    info!("Watching {} instance deployments from {}", list.items.len(), version);

    loop {
        let mut stream = ids.watch(&WatchParams::default().timeout(60), &version).await?;
        loop {
            match stream.try_next().await {
                Ok(Some(event)) => {
                    if let Some(rv) = event.object().and_then(|o| o.resource_version()) {
                        version = rv.to_string();
                    }
                    match event {
                        WatchEvent::Added(o) => info!("Added {}", o.name().unwrap_or_default()),
                        WatchEvent::Modified(o) => {
                            let ready = o.status.as_ref().map(|s| s.ready_replicas).unwrap_or_default();
                            info!("Modified {}: {} ready", o.name().unwrap_or_default(), ready);
                        }
                        WatchEvent::Deleted(o) => info!("Deleted {}", o.name().unwrap_or_default()),
                        WatchEvent::Bookmark(b) => version = b.metadata.resource_version,
                        WatchEvent::Error(e) => return Err(Error::Api(e).into()),
                    }
                }
                // The server closed the watch, reconnect from the last seen version
                Ok(None) => break,
                Err(e) => return Err(e.into()),
            }
        }
        debug!("watch closed, resuming from {}", version);
    }
}
