//! Repository for saved addresses.

use chrono::Utc;
use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;

use super::user_repository;
use crate::entities::Address;
use crate::types::StoreResult;

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

#[derive(Clone)]
pub struct AddressRepository {
    pool: SqlitePool,
}

impl AddressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Saved addresses of a user, oldest first.
    pub async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Address>> {
        let rows = sqlx::query(
            "SELECT public_id, user_id, text, created_at FROM addresses WHERE user_id = ? ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(address_from_row).collect()
    }

    pub async fn create(&self, user_id: i64, text: &str) -> StoreResult<Address> {
        let public_id = CUID.create_id();
        let now = Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO addresses (public_id, user_id, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&public_id)
        .bind(user_id)
        .bind(text)
        .bind(&now)
        .execute(&mut *tx)
        .await?;
        user_repository::bump_version(&mut *tx, user_id).await?;
        tx.commit().await?;

        info!(user_id, address = %public_id, "saved address");

        Ok(Address {
            id: public_id,
            text: text.to_owned(),
            user_id,
            created_at: now,
        })
    }

    /// Deletes one of the user's addresses. Returns `false` when the user has
    /// no address with that id.
    pub async fn delete(&self, user_id: i64, public_id: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM addresses WHERE user_id = ? AND public_id = ?")
            .bind(user_id)
            .bind(public_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        user_repository::bump_version(&mut *tx, user_id).await?;
        tx.commit().await?;
        Ok(true)
    }
}

pub(crate) async fn count_for_user(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM addresses WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

fn address_from_row(row: &SqliteRow) -> StoreResult<Address> {
    Ok(Address {
        id: row.try_get("public_id")?,
        text: row.try_get("text")?,
        user_id: row.try_get("user_id")?,
        created_at: row.try_get("created_at")?,
    })
}
