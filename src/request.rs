use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ValidationError;
use crate::models::PLAYER_ID_PREFIX;

static VALID_PID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{PLAYER_ID_PREFIX}[a-zA-Z0-9-]+$")).expect("valid pid regex")
});

/// Body of a POST /player request.
#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    #[serde(default)]
    pub positions: Vec<String>,
}

/// Extract the player identifier from the request's path parameters.
///
/// No parameters means create intent and yields `None`. Exactly one
/// parameter is accepted only under the key `pid` and only when the value
/// matches the pid format; anything else is a validation error.
pub fn validate_path_parameters(
    params: &HashMap<String, String>,
) -> Result<Option<String>, ValidationError> {
    match params.len() {
        0 => Ok(None),
        1 => {
            let (key, value) = params.iter().next().expect("one entry");
            if key != "pid" {
                return Err(ValidationError::UnexpectedPathParameter(key.clone()));
            }
            if !VALID_PID.is_match(value) {
                return Err(ValidationError::MalformedPlayerId);
            }
            Ok(Some(value.clone()))
        }
        _ => Err(ValidationError::TooManyPathParameters),
    }
}

/// Parse and validate a create-player request body.
pub fn validate_create_player_request(body: &str) -> Result<CreatePlayerRequest, ValidationError> {
    let request: CreatePlayerRequest = serde_json::from_str(body)?;
    if request.name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok(request)
}
