//! Repository for the commerce fields of user records.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::parse_money;
use crate::entities::UserRecord;
use crate::types::StoreResult;

const USER_COLUMNS: &str =
    "id, public_id, name, email, wallet_money, legacy_address, version";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_public_id(&self, public_id: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| user_from_row(&row)).transpose()
    }

    /// Overwrites the legacy address and bumps the version stamp.
    pub async fn set_legacy_address(&self, id: i64, address: Option<&str>) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET legacy_address = ?, version = version + 1, updated_at = ? WHERE id = ?",
        )
        .bind(address)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> StoreResult<Option<UserRecord>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|row| user_from_row(&row)).transpose()
}

/// Marks the user's cart or address book as changed.
pub(crate) async fn bump_version(conn: &mut SqliteConnection, id: i64) -> StoreResult<()> {
    sqlx::query("UPDATE users SET version = version + 1, updated_at = ? WHERE id = ?")
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Writes a new wallet balance only if the version stamp still equals
/// `expected_version`. Returns whether the row was updated.
pub(crate) async fn compare_and_set_wallet(
    conn: &mut SqliteConnection,
    id: i64,
    expected_version: i64,
    wallet_money: Decimal,
) -> StoreResult<bool> {
    let result = sqlx::query(
        "UPDATE users SET wallet_money = ?, version = version + 1, updated_at = ? WHERE id = ? AND version = ?",
    )
    .bind(wallet_money.to_string())
    .bind(Utc::now().to_rfc3339())
    .bind(id)
    .bind(expected_version)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

fn user_from_row(row: &SqliteRow) -> StoreResult<UserRecord> {
    let wallet: String = row.try_get("wallet_money")?;

    Ok(UserRecord {
        id: row.try_get("id")?,
        public_id: row.try_get("public_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        wallet_money: parse_money("wallet_money", &wallet)?,
        legacy_address: row.try_get("legacy_address")?,
        version: row.try_get("version")?,
    })
}
