//! Commerce view of a user record

use rust_decimal::Decimal;
use serde::Serialize;

use super::Address;

/// A user row with the fields the commerce core reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub public_id: String,
    pub name: String,
    pub email: String,
    pub wallet_money: Decimal,
    pub legacy_address: Option<String>,
    pub version: i64,
}

/// Full profile returned to the owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub wallet_money: Decimal,
    pub address: Option<String>,
    pub addresses: Vec<Address>,
}

/// Which slice of the user record a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Full,
    AddressOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserView {
    Full(UserProfile),
    AddressOnly { address: Option<String> },
}
