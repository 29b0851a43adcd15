use lambda_http::http::{StatusCode, header};
use lambda_http::{Body, Response};
use serde::Serialize;

use crate::models::Player;

#[derive(Debug, Serialize)]
struct CreatePlayerResponse {
    pid: String,
    status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    developer_text: Option<String>,
    status: String,
}

impl ErrorResponse {
    fn new(status: &str) -> Self {
        Self {
            developer_text: None,
            status: status.to_string(),
        }
    }
}

/// Serialize a payload into the outbound envelope. A failure here is a
/// programming defect, not a client or store fault, so abort the invocation
/// instead of returning a corrupted envelope.
fn format_response<T: Serialize>(payload: &T, status: StatusCode) -> Response<Body> {
    let body = serde_json::to_string(payload)
        .unwrap_or_else(|err| panic!("unable to serialize response body: {err}"));

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::Text(body))
        .unwrap_or_else(|err| panic!("unable to build response envelope: {err}"))
}

pub fn created(pid: &str) -> Response<Body> {
    let payload = CreatePlayerResponse {
        pid: pid.to_string(),
        status: "Success".to_string(),
    };
    format_response(&payload, StatusCode::OK)
}

pub fn fetched(player: &Player) -> Response<Body> {
    format_response(player, StatusCode::OK)
}

pub fn bad_request() -> Response<Body> {
    format_response(&ErrorResponse::new("Bad Request"), StatusCode::BAD_REQUEST)
}

pub fn not_found() -> Response<Body> {
    format_response(
        &ErrorResponse::new("Resource Not Found"),
        StatusCode::NOT_FOUND,
    )
}

pub fn internal_server_error() -> Response<Body> {
    format_response(
        &ErrorResponse::new("Internal Server Error"),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

pub fn not_implemented() -> Response<Body> {
    format_response(
        &ErrorResponse::new("Not Implemented"),
        StatusCode::NOT_IMPLEMENTED,
    )
}
