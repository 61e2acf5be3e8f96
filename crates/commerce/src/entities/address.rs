//! Saved shipping address entity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Public identifier used in URLs.
    pub id: String,
    #[serde(rename = "address")]
    pub text: String,
    #[serde(skip)]
    pub user_id: i64,
    #[serde(skip)]
    pub created_at: String,
}
