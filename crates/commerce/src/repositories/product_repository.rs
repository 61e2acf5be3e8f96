//! Read access to the catalog, plus the bulk upsert used by catalog import.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use super::{parse_money, parse_rating};
use crate::entities::Product;
use crate::types::StoreResult;

#[derive(Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, category, cost, rating, image FROM products ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }

    pub async fn find(&self, id: &str) -> StoreResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        find(&mut *conn, id).await
    }

    /// Products whose name or category contains `value`, ignoring ASCII case.
    pub async fn search(&self, value: &str) -> StoreResult<Vec<Product>> {
        let pattern = format!("%{}%", escape_like(value.trim()));

        let rows = sqlx::query(
            r#"
            SELECT id, name, category, cost, rating, image FROM products
            WHERE name LIKE ? ESCAPE '\' OR category LIKE ? ESCAPE '\'
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(product_from_row).collect()
    }

    /// Inserts or replaces the given products in one transaction.
    pub async fn upsert_many(&self, products: &[Product]) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for product in products {
            let result = sqlx::query(
                r#"
                INSERT INTO products (id, name, category, cost, rating, image)
                VALUES (?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    category = excluded.category,
                    cost = excluded.cost,
                    rating = excluded.rating,
                    image = excluded.image
                "#,
            )
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.cost.to_string())
            .bind(i64::from(product.rating))
            .bind(&product.image)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }
}

pub(crate) async fn find(conn: &mut SqliteConnection, id: &str) -> StoreResult<Option<Product>> {
    let row = sqlx::query("SELECT id, name, category, cost, rating, image FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(product_from_row).transpose()
}

fn product_from_row(row: &SqliteRow) -> StoreResult<Product> {
    let cost: String = row.try_get("cost")?;
    let rating: i64 = row.try_get("rating")?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        cost: parse_money("cost", &cost)?,
        rating: parse_rating(rating)?,
        image: row.try_get("image")?,
    })
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
