use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix for every player identifier. The full pid is this prefix followed
/// by a freshly generated UUIDv4.
pub const PLAYER_ID_PREFIX: &str = "p-";

/// Persisted player record. The identifier is stored under both the
/// partition key and the (duplicated) sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pk: String,
    pub sk: String,
    pub name: String,
    #[serde(default)]
    pub positions: Vec<String>,
    #[serde(default)]
    pub stats: Vec<StatLine>,
}

/// Per-game batting counters. Never populated at creation time; players
/// always start with an empty stats sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub game_id: String,
    pub at_bats: i64,
    pub hits: i64,
    pub runs: i64,
    pub rbis: i64,
}

impl Player {
    /// Build a new record for the create path: pid duplicated into pk/sk,
    /// stats initialized empty.
    pub fn new(pid: String, name: String, positions: Vec<String>) -> Self {
        Self {
            pk: pid.clone(),
            sk: pid,
            name,
            positions,
            stats: Vec::new(),
        }
    }

    /// Generate a fresh server-side identifier.
    pub fn generate_pid() -> String {
        format!("{PLAYER_ID_PREFIX}{}", Uuid::new_v4())
    }
}
