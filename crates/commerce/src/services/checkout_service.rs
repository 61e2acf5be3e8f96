//! Checkout engine.
//!
//! A checkout reads a snapshot (wallet, version stamp, cart, address count),
//! validates it without touching the store, then commits the debit with a
//! compare-and-swap on the version stamp. A stale snapshot is discarded and
//! the whole sequence starts over, up to the configured attempt limit.
//!
//! A retry first checks that the fresh wallet still covers the total the
//! caller tried to pay. When a concurrent checkout has drained the wallet
//! (and emptied the cart) the loser reports `InsufficientBalance` rather
//! than a confusing `EmptyCart`.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;
use storefront_config::CartConfig;
use tracing::{debug, error, info};

use super::compute_total;
use crate::entities::Cart;
use crate::repositories::{address_repository, cart_repository, user_repository};
use crate::types::{Identity, StoreError, StoreResult};

/// Everything a checkout decision depends on, read in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSnapshot {
    pub user_id: i64,
    pub wallet_money: Decimal,
    pub version: i64,
    pub cart: Cart,
    pub saved_addresses: i64,
}

/// A snapshot that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovedCheckout {
    pub total: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub wallet_money: Decimal,
    pub charged: Decimal,
}

impl CheckoutSnapshot {
    /// Applies the checkout preconditions in order: a non-empty cart, at
    /// least one saved address, enough money. The legacy address field never
    /// counts as a saved address.
    pub fn evaluate(&self) -> StoreResult<ApprovedCheckout> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        if self.saved_addresses == 0 {
            return Err(StoreError::NoAddress);
        }

        let total = compute_total(self.cart.lines());
        self.ensure_affordable(total)?;

        Ok(ApprovedCheckout {
            total,
            remaining: self.wallet_money - total,
        })
    }

    pub fn ensure_affordable(&self, total: Decimal) -> StoreResult<()> {
        if self.wallet_money < total {
            return Err(StoreError::InsufficientBalance {
                balance: self.wallet_money,
                total,
            });
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct CheckoutService {
    pool: SqlitePool,
    max_attempts: u32,
}

impl CheckoutService {
    pub fn new(pool: SqlitePool, config: &CartConfig) -> Self {
        Self {
            pool,
            max_attempts: config.checkout_max_attempts.max(1),
        }
    }

    pub async fn checkout(&self, identity: &Identity) -> StoreResult<CheckoutReceipt> {
        let snapshot = self.snapshot(identity.user_id).await?;
        self.settle(identity, snapshot).await
    }

    /// Runs the validate-and-commit loop starting from `snapshot`, which may
    /// already be stale. Later attempts read fresh snapshots.
    pub async fn settle(
        &self,
        identity: &Identity,
        mut snapshot: CheckoutSnapshot,
    ) -> StoreResult<CheckoutReceipt> {
        let mut attempted: Option<Decimal> = None;

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                snapshot = self.snapshot(identity.user_id).await?;
            }
            if let Some(total) = attempted {
                snapshot.ensure_affordable(total)?;
            }
            let approved = snapshot.evaluate()?;

            if self.commit(&snapshot, &approved).await? {
                info!(
                    user = %identity.public_id,
                    charged = %approved.total,
                    wallet_money = %approved.remaining,
                    attempt,
                    "checkout committed"
                );
                return Ok(CheckoutReceipt {
                    wallet_money: approved.remaining,
                    charged: approved.total,
                });
            }

            attempted = Some(approved.total);
            debug!(user = %identity.public_id, attempt, "checkout snapshot was stale, retrying");
        }

        error!(user = %identity.public_id, attempts = self.max_attempts, "checkout retries exhausted");
        Err(StoreError::Contention {
            attempts: self.max_attempts,
        })
    }

    pub async fn snapshot(&self, user_id: i64) -> StoreResult<CheckoutSnapshot> {
        let mut tx = self.pool.begin().await?;

        let user = user_repository::find_by_id(&mut *tx, user_id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", user_id.to_string()))?;
        let cart = cart_repository::load(&mut *tx, user_id).await?;
        let saved_addresses = address_repository::count_for_user(&mut *tx, user_id).await?;

        tx.commit().await?;

        Ok(CheckoutSnapshot {
            user_id,
            wallet_money: user.wallet_money,
            version: user.version,
            cart,
            saved_addresses,
        })
    }

    /// Debits the wallet and empties the cart if the version stamp still
    /// matches the snapshot. Returns `false` and changes nothing otherwise.
    pub async fn commit(
        &self,
        snapshot: &CheckoutSnapshot,
        approved: &ApprovedCheckout,
    ) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let swapped = user_repository::compare_and_set_wallet(
            &mut *tx,
            snapshot.user_id,
            snapshot.version,
            approved.remaining,
        )
        .await?;

        if !swapped {
            tx.rollback().await?;
            return Ok(false);
        }

        cart_repository::clear(&mut *tx, snapshot.user_id).await?;
        tx.commit().await?;
        Ok(true)
    }
}
