use std::env;

pub const LOCAL_ENVIRONMENT: &str = "local";
pub const PLAYER_TABLE_PREFIX: &str = "player-table";
pub const LOCAL_STORE_ENDPOINT: &str = "http://localhost:8000";

/// Immutable configuration resolved once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub table_name: String,
    /// Endpoint override for the store client. Defaults to a local DynamoDB
    /// when running in the local environment, none otherwise.
    pub store_endpoint: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            env::var("ENVIRONMENT").ok(),
            env::var("PLAYER_TABLE_NAME").ok(),
            env::var("DYNAMODB_ENDPOINT").ok(),
        )
    }

    fn resolve(
        environment: Option<String>,
        table_name: Option<String>,
        store_endpoint: Option<String>,
    ) -> Self {
        let environment = environment.unwrap_or_else(|| LOCAL_ENVIRONMENT.to_string());
        let table_name =
            table_name.unwrap_or_else(|| format!("{PLAYER_TABLE_PREFIX}-{environment}"));
        let store_endpoint = store_endpoint.or_else(|| {
            (environment == LOCAL_ENVIRONMENT).then(|| LOCAL_STORE_ENDPOINT.to_string())
        });
        Self {
            environment,
            table_name,
            store_endpoint,
        }
    }
}

/// Everything an invocation needs, built once at startup and shared by
/// reference across concurrent invocations.
pub struct AppContext<S> {
    pub config: AppConfig,
    pub store: S,
}
