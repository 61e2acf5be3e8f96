//! Repository for cart lines.
//!
//! Lines are keyed by `(user_id, product_id)` in storage. Every write also
//! bumps the owner's version stamp in the same transaction.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{parse_money, parse_quantity, parse_rating, product_repository, user_repository};
use crate::entities::{Cart, CartEntry, CartIntent, CartLine, Product};
use crate::types::{Quantity, StoreError, StoreResult};

#[derive(Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, user_id: i64) -> StoreResult<Cart> {
        let mut conn = self.pool.acquire().await?;
        load(&mut *conn, user_id).await
    }

    /// Writes one line. With [`CartIntent::Add`] an existing line is left
    /// untouched and the call fails with `Conflict`.
    pub async fn write_line(
        &self,
        user_id: i64,
        product_id: &str,
        quantity: Quantity,
        intent: CartIntent,
    ) -> StoreResult<()> {
        let now = Utc::now().to_rfc3339();

        {
            let mut conn = self.pool.acquire().await?;
            if product_repository::find(&mut *conn, product_id).await?.is_none() {
                return Err(StoreError::not_found("product", product_id));
            }
        }

        // The first statement of a write transaction must be a write, so the
        // connection takes the write lock (and waits on busy) up front.
        let mut tx = self.pool.begin().await?;

        let sql = match intent {
            CartIntent::Add => {
                "INSERT INTO cart_items (user_id, product_id, quantity, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?)
                 ON CONFLICT(user_id, product_id) DO NOTHING"
            }
            CartIntent::Update => {
                "INSERT INTO cart_items (user_id, product_id, quantity, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?)
                 ON CONFLICT(user_id, product_id) DO UPDATE SET
                     quantity = excluded.quantity,
                     updated_at = excluded.updated_at"
            }
        };

        let result = sqlx::query(sql)
            .bind(user_id)
            .bind(product_id)
            .bind(i64::from(quantity))
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::conflict(format!(
                "product {product_id} is already in the cart"
            )));
        }

        user_repository::bump_version(&mut *tx, user_id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Removes one line. Returns `false` when there was no such line.
    pub async fn delete_line(&self, user_id: i64, product_id: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ? AND product_id = ?")
            .bind(user_id)
            .bind(product_id)
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

    /// Every cart line in the store, for operator dumps.
    pub async fn list_all(&self) -> StoreResult<Vec<CartEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT u.email, ci.product_id, ci.quantity
            FROM cart_items ci
            JOIN users u ON u.id = ci.user_id
            ORDER BY u.email ASC, ci.product_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let quantity: i64 = row.try_get("quantity")?;
                Ok(CartEntry {
                    owner_email: row.try_get("email")?,
                    product_id: row.try_get("product_id")?,
                    quantity: parse_quantity(quantity)?,
                })
            })
            .collect()
    }
}

/// The user's cart joined with live catalog data.
pub(crate) async fn load(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<Cart> {
    let rows = sqlx::query(
        r#"
        SELECT ci.product_id, ci.quantity, p.name, p.category, p.cost, p.rating, p.image
        FROM cart_items ci
        JOIN products p ON p.id = ci.product_id
        WHERE ci.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(line_from_row).collect()
}

/// Empties the cart. Used by checkout inside its commit transaction.
pub(crate) async fn clear(conn: &mut SqliteConnection, user_id: i64) -> StoreResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

fn line_from_row(row: &SqliteRow) -> StoreResult<CartLine> {
    let product_id: String = row.try_get("product_id")?;
    let quantity: i64 = row.try_get("quantity")?;
    let cost: String = row.try_get("cost")?;
    let rating: i64 = row.try_get("rating")?;

    Ok(CartLine {
        quantity: parse_quantity(quantity)?,
        product: Product {
            id: product_id.clone(),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            cost: parse_money("cost", &cost)?,
            rating: parse_rating(rating)?,
            image: row.try_get("image")?,
        },
        product_id,
    })
}
