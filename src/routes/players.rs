use std::collections::HashMap;

use lambda_http::http::Method;
use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracing::{error, info, warn};

use crate::config::AppContext;
use crate::db::PlayerStore;
use crate::models::Player;
use crate::{request, response};

/// Entry point for every invocation: extract the path parameter, dispatch on
/// method, and map every outcome to a response envelope. Errors never
/// propagate to the invocation layer.
pub async fn handle_request<S: PlayerStore>(
    ctx: &AppContext<S>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let params: HashMap<String, String> = event
        .path_parameters()
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let pid = match request::validate_path_parameters(&params) {
        Ok(pid) => pid,
        Err(err) => {
            warn!(error = %err, "error validating path parameters");
            return Ok(response::bad_request());
        }
    };

    let method = event.method().clone();
    let envelope = if method == Method::POST {
        match pid {
            None => create_player(ctx, event.body()).await,
            Some(pid) => update_player(&pid),
        }
    } else if method == Method::GET {
        match pid {
            Some(pid) => get_player(ctx, &pid).await,
            // No record can exist under an absent identifier.
            None => response::not_found(),
        }
    } else {
        warn!(method = %method, "unsupported method");
        response::bad_request()
    };

    Ok(envelope)
}

async fn create_player<S: PlayerStore>(ctx: &AppContext<S>, body: &Body) -> Response<Body> {
    let pid = Player::generate_pid();

    let raw = match std::str::from_utf8(body.as_ref()) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(pid = %pid, error = %err, "request body is not valid utf-8");
            return response::bad_request();
        }
    };

    let validated = match request::validate_create_player_request(raw) {
        Ok(validated) => validated,
        Err(err) => {
            warn!(pid = %pid, error = %err, "error validating request");
            return response::bad_request();
        }
    };

    let player = Player::new(pid.clone(), validated.name, validated.positions);
    if let Err(err) = ctx.store.put_player(&player).await {
        error!(pid = %pid, error = %err, "error putting player into store");
        return response::internal_server_error();
    }

    info!(pid = %pid, "player created");
    response::created(&pid)
}

fn update_player(pid: &str) -> Response<Body> {
    // Update semantics are not settled; refuse loudly instead of reporting
    // a success that never touched storage.
    warn!(pid = %pid, "update requested but not implemented");
    response::not_implemented()
}

async fn get_player<S: PlayerStore>(ctx: &AppContext<S>, pid: &str) -> Response<Body> {
    match ctx.store.get_player(pid).await {
        Ok(Some(player)) => {
            info!(pid = %pid, "player fetched");
            response::fetched(&player)
        }
        Ok(None) => response::not_found(),
        Err(err) => {
            error!(pid = %pid, error = %err, "error getting player from store");
            response::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::memory::{FailingPlayerStore, MemoryPlayerStore};
    use serde_json::{Value, json};

    fn context<S: PlayerStore>(store: S) -> AppContext<S> {
        AppContext {
            config: AppConfig {
                environment: "test".to_string(),
                table_name: "player-table-test".to_string(),
                store_endpoint: None,
            },
            store,
        }
    }

    fn event(method: &str, pid: Option<&str>, body: Option<&str>) -> Request {
        let body = match body {
            Some(text) => Body::Text(text.to_string()),
            None => Body::Empty,
        };
        let request = lambda_http::http::Request::builder()
            .method(method)
            .uri("/player")
            .body(body)
            .unwrap();
        match pid {
            Some(pid) => request
                .with_path_parameters(HashMap::from([("pid".to_string(), pid.to_string())])),
            None => request,
        }
    }

    fn body_json(response: &Response<Body>) -> Value {
        match response.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected text body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips_the_record() {
        let ctx = context(MemoryPlayerStore::default());

        let created = handle_request(
            &ctx,
            event(
                "POST",
                None,
                Some(r#"{"name":"Jane Doe","positions":["SS","2B"]}"#),
            ),
        )
        .await
        .unwrap();
        assert_eq!(created.status(), 200);

        let created_body = body_json(&created);
        assert_eq!(created_body["status"], "Success");
        let pid = created_body["pid"].as_str().unwrap().to_string();
        assert!(pid.starts_with("p-"));

        let fetched = handle_request(&ctx, event("GET", Some(&pid), None))
            .await
            .unwrap();
        assert_eq!(fetched.status(), 200);
        assert_eq!(
            body_json(&fetched),
            json!({
                "pk": pid,
                "sk": pid,
                "name": "Jane Doe",
                "positions": ["SS", "2B"],
                "stats": []
            })
        );
    }

    #[tokio::test]
    async fn repeated_creates_generate_distinct_pids() {
        let ctx = context(MemoryPlayerStore::default());
        let body = r#"{"name":"Jane Doe"}"#;

        let first = handle_request(&ctx, event("POST", None, Some(body)))
            .await
            .unwrap();
        let second = handle_request(&ctx, event("POST", None, Some(body)))
            .await
            .unwrap();
        assert_ne!(body_json(&first)["pid"], body_json(&second)["pid"]);
    }

    #[tokio::test]
    async fn create_without_name_is_a_bad_request() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(&ctx, event("POST", None, Some(r#"{"positions":["SS"]}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response), json!({"status": "Bad Request"}));
    }

    #[tokio::test]
    async fn create_with_empty_body_is_a_bad_request() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(&ctx, event("POST", None, None)).await.unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn get_unknown_pid_is_not_found() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(&ctx, event("GET", Some("p-does-not-exist"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(body_json(&response), json!({"status": "Resource Not Found"}));
    }

    #[tokio::test]
    async fn get_without_pid_is_not_found() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(&ctx, event("GET", None, None)).await.unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn malformed_pid_is_a_bad_request() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(&ctx, event("GET", Some("not-a-pid"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn unexpected_path_parameter_key_is_a_bad_request() {
        let ctx = context(MemoryPlayerStore::default());
        let request = lambda_http::http::Request::builder()
            .method("GET")
            .uri("/player")
            .body(Body::Empty)
            .unwrap()
            .with_path_parameters(HashMap::from([("player".to_string(), "p-abc".to_string())]));
        let response = handle_request(&ctx, request).await.unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn update_is_not_implemented() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(
            &ctx,
            event("POST", Some("p-abc123"), Some(r#"{"name":"New Name"}"#)),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 501);
        assert_eq!(body_json(&response), json!({"status": "Not Implemented"}));
    }

    #[tokio::test]
    async fn unsupported_method_is_a_bad_request() {
        let ctx = context(MemoryPlayerStore::default());
        let response = handle_request(&ctx, event("DELETE", Some("p-abc123"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn store_failures_surface_as_internal_errors() {
        let ctx = context(FailingPlayerStore);

        let create = handle_request(&ctx, event("POST", None, Some(r#"{"name":"Jane Doe"}"#)))
            .await
            .unwrap();
        assert_eq!(create.status(), 500);
        assert_eq!(body_json(&create), json!({"status": "Internal Server Error"}));

        let get = handle_request(&ctx, event("GET", Some("p-abc123"), None))
            .await
            .unwrap();
        assert_eq!(get.status(), 500);
    }
}
