use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Service accounts never appear in reports.
    #[serde(default)]
    pub system_account: bool,
}
