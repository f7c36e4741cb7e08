use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
}

/// One generated database schema, exactly as stored and returned.
///
/// The model's reply is not validated against any contract: `table_name`
/// and `columns` default to empty when the reply omits them, and any
/// additional fields the model invents ride along in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SchemaRecord {
    pub id: Uuid,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}
