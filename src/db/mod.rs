use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Player, StatLine};

const PK_ATTRIBUTE: &str = "pk";
const SK_ATTRIBUTE: &str = "sk";
const NAME_ATTRIBUTE: &str = "name";
const POSITIONS_ATTRIBUTE: &str = "positions";
const STATS_ATTRIBUTE: &str = "stats";

/// Single-item persistence for player records. Implemented against DynamoDB
/// in production and in memory for handler tests.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Write one record, unconditionally overwriting anything at its key.
    async fn put_player(&self, player: &Player) -> Result<(), StoreError>;

    /// Point lookup by identifier. `Ok(None)` means no such record exists.
    async fn get_player(&self, pid: &str) -> Result<Option<Player>, StoreError>;
}

pub struct DynamoPlayerStore {
    client: Client,
    table_name: String,
}

impl DynamoPlayerStore {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl PlayerStore for DynamoPlayerStore {
    async fn put_player(&self, player: &Player) -> Result<(), StoreError> {
        let item = marshal_player(player);
        debug!(table = %self.table_name, pid = %player.pk, "inserting item");

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|err| StoreError::Request(err.to_string()))?;

        Ok(())
    }

    async fn get_player(&self, pid: &str) -> Result<Option<Player>, StoreError> {
        debug!(table = %self.table_name, pid = %pid, "fetching item");

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PK_ATTRIBUTE, AttributeValue::S(pid.to_string()))
            .key(SK_ATTRIBUTE, AttributeValue::S(pid.to_string()))
            .send()
            .await
            .map_err(|err| StoreError::Request(err.to_string()))?;

        output.item.as_ref().map(unmarshal_player).transpose()
    }
}

fn marshal_player(player: &Player) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            PK_ATTRIBUTE.to_string(),
            AttributeValue::S(player.pk.clone()),
        ),
        (
            SK_ATTRIBUTE.to_string(),
            AttributeValue::S(player.sk.clone()),
        ),
        (
            NAME_ATTRIBUTE.to_string(),
            AttributeValue::S(player.name.clone()),
        ),
        (
            POSITIONS_ATTRIBUTE.to_string(),
            AttributeValue::L(
                player
                    .positions
                    .iter()
                    .cloned()
                    .map(AttributeValue::S)
                    .collect(),
            ),
        ),
        (
            STATS_ATTRIBUTE.to_string(),
            AttributeValue::L(player.stats.iter().map(marshal_stat_line).collect()),
        ),
    ])
}

fn marshal_stat_line(stats: &StatLine) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        (
            "game_id".to_string(),
            AttributeValue::S(stats.game_id.clone()),
        ),
        (
            "at_bats".to_string(),
            AttributeValue::N(stats.at_bats.to_string()),
        ),
        ("hits".to_string(), AttributeValue::N(stats.hits.to_string())),
        ("runs".to_string(), AttributeValue::N(stats.runs.to_string())),
        ("rbis".to_string(), AttributeValue::N(stats.rbis.to_string())),
    ]))
}

fn unmarshal_player(item: &HashMap<String, AttributeValue>) -> Result<Player, StoreError> {
    Ok(Player {
        pk: string_attribute(item, PK_ATTRIBUTE)?,
        sk: string_attribute(item, SK_ATTRIBUTE)?,
        name: string_attribute(item, NAME_ATTRIBUTE)?,
        positions: match item.get(POSITIONS_ATTRIBUTE) {
            Some(value) => string_list(value)?,
            None => Vec::new(),
        },
        stats: match item.get(STATS_ATTRIBUTE) {
            Some(value) => stat_list(value)?,
            None => Vec::new(),
        },
    })
}

fn string_attribute(
    item: &HashMap<String, AttributeValue>,
    name: &'static str,
) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or(StoreError::MalformedItem(name))
}

fn string_list(value: &AttributeValue) -> Result<Vec<String>, StoreError> {
    value
        .as_l()
        .map_err(|_| StoreError::MalformedItem(POSITIONS_ATTRIBUTE))?
        .iter()
        .map(|entry| {
            entry
                .as_s()
                .cloned()
                .map_err(|_| StoreError::MalformedItem(POSITIONS_ATTRIBUTE))
        })
        .collect()
}

fn stat_list(value: &AttributeValue) -> Result<Vec<StatLine>, StoreError> {
    value
        .as_l()
        .map_err(|_| StoreError::MalformedItem(STATS_ATTRIBUTE))?
        .iter()
        .map(unmarshal_stat_line)
        .collect()
}

fn unmarshal_stat_line(value: &AttributeValue) -> Result<StatLine, StoreError> {
    let entry = value
        .as_m()
        .map_err(|_| StoreError::MalformedItem(STATS_ATTRIBUTE))?;
    Ok(StatLine {
        game_id: string_attribute(entry, "game_id")?,
        at_bats: number_attribute(entry, "at_bats")?,
        hits: number_attribute(entry, "hits")?,
        runs: number_attribute(entry, "runs")?,
        rbis: number_attribute(entry, "rbis")?,
    })
}

fn number_attribute(
    item: &HashMap<String, AttributeValue>,
    name: &'static str,
) -> Result<i64, StoreError> {
    item.get(name)
        .and_then(|value| value.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or(StoreError::MalformedItem(name))
}
