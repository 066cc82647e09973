//! Computer entity model.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `computers` table, also used as the JSON body of the API.
///
/// Every field defaults to an empty string when missing from the JSON body
/// or set to `null`, so validation (not deserialization) decides which fields
/// are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Computer {
    /// Primary key. Never changes after creation.
    #[serde(deserialize_with = "null_as_empty")]
    pub mac_addr: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub computer_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub ip_addr: String,
    /// Owning employee; empty when the computer is unassigned.
    #[serde(deserialize_with = "null_as_empty")]
    pub employee_abbr: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
