//! Catalog product entity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{StoreError, StoreResult};

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub cost: Decimal,
    pub rating: u8,
    pub image: String,
}

impl Product {
    /// Checks the catalog invariants: a non-empty id, positive cost and a
    /// rating within `0..=5`.
    pub fn validate(&self) -> StoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(StoreError::validation("product id must not be empty"));
        }
        if self.cost <= Decimal::ZERO {
            return Err(StoreError::validation(format!(
                "product {} must have a positive cost",
                self.id
            )));
        }
        if self.rating > MAX_RATING {
            return Err(StoreError::validation(format!(
                "product {} rating must be between 0 and {MAX_RATING}",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(cost: i64, rating: u8) -> Product {
        Product {
            id: "p1".into(),
            name: "Lamp".into(),
            category: "Home".into(),
            cost: Decimal::from(cost),
            rating,
            image: "https://img.example/lamp.png".into(),
        }
    }

    #[test]
    fn accepts_valid_product() {
        assert!(product(10, 5).validate().is_ok());
        assert!(product(1, 0).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_cost_and_bad_rating() {
        assert!(product(0, 3).validate().is_err());
        assert!(product(-4, 3).validate().is_err());
        assert!(product(10, 6).validate().is_err());
    }

    #[test]
    fn deserializes_underscore_id() {
        let json = r#"{"_id":"abc","name":"Mug","category":"Kitchen","cost":12.5,"rating":4,"image":"x"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "abc");
        assert_eq!(product.cost, "12.5".parse::<Decimal>().unwrap());
    }
}
