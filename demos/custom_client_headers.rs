// Custom client stack with an extra request layer on top of the default one.
use http::{header::AUTHORIZATION, HeaderValue};
use tower_http::set_header::SetRequestHeaderLayer;
use tracing::*;

use node_client::{clientset::*, ClientBuilder, Config};
use node_core::{params::ListParams, Resource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::infer()?.header("user-agent", "node-demos/custom-client")?;
    let builder = ClientBuilder::try_from(config)?;
    // Authentication is up to the caller, here a static bearer token
    let client = match std::env::var("NODE_TOKEN") {
        Ok(token) => {
            let value = HeaderValue::try_from(format!("Bearer {token}"))?;
            builder
                .with_layer(&SetRequestHeaderLayer::overriding(AUTHORIZATION, value))
                .build()
        }
        Err(_) => builder.build(),
    };

    let node = NodeV1alpha1Client::new(client);
    for o in node.instance_deployments().list(&ListParams::default().limit(20)).await? {
        info!("{}", o.name().unwrap_or_default());
    }
    Ok(())
}
