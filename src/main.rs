use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use lambda_http::{Error, run, service_fn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, AppContext};
use crate::db::DynamoPlayerStore;

mod config;
mod db;
mod error;
mod models;
mod request;
mod response;
mod routes;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    tracing::info!(
        environment = %config.environment,
        table = %config.table_name,
        "initializing player endpoint"
    );

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut store_config = aws_sdk_dynamodb::config::Builder::from(&aws_config);
    if let Some(endpoint) = &config.store_endpoint {
        tracing::info!(endpoint = %endpoint, "using store endpoint override");
        store_config = store_config.endpoint_url(endpoint);
    }
    let client = Client::from_conf(store_config.build());

    let store = DynamoPlayerStore::new(client, config.table_name.clone());
    let ctx = AppContext { config, store };

    run(service_fn(|event| {
        routes::players::handle_request(&ctx, event)
    }))
    .await
}
