//! Product Repository (Product Ledger)
//!
//! Owns the authoritative `stock` field. Every mutation is a direct
//! persistent write; reads always hit storage so the sale path never sees
//! a stale count.

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Column list shared by every SELECT (picture columns aliased for the
/// flattened `Picture` row type).
const COLUMNS: &str = "id, name, category, price, buy_price, stock, code, \
     picture_public_id AS public_id, picture_url AS url, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product ORDER BY created_at, id");
    let products = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Products at or below the given stock threshold (stock alert view).
pub async fn find_low_stock(pool: &SqlitePool, threshold: i64) -> RepoResult<Vec<Product>> {
    let sql = format!("SELECT {COLUMNS} FROM product WHERE stock <= ? ORDER BY stock, name");
    let products = sqlx::query_as::<_, Product>(&sql)
        .bind(threshold)
        .fetch_all(pool)
        .await?;
    Ok(products)
}

/// Create a product.
///
/// `code` is allocated inside the INSERT itself as `MAX(code) + 1`
/// (1000 for the first product ever). Computing it from the highest
/// existing code, not a row count, keeps codes collision-free across
/// deletions; the UNIQUE constraint backstops concurrent inserts.
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if data.price < 0.0 {
        return Err(RepoError::Validation("price cannot be negative".into()));
    }
    if data.buy_price.is_some_and(|p| p < 0.0) {
        return Err(RepoError::Validation("buyPrice cannot be negative".into()));
    }
    if data.stock.is_some_and(|s| s < 0) {
        return Err(RepoError::Validation("stock cannot be negative".into()));
    }

    let id = snowflake_id();
    let picture = data.picture.unwrap_or_default();

    sqlx::query(
        "INSERT INTO product (id, name, category, price, buy_price, stock, code, picture_public_id, picture_url, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, (SELECT COALESCE(MAX(code), 999) + 1 FROM product), ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(data.buy_price.unwrap_or(0.0))
    .bind(data.stock.unwrap_or(0))
    .bind(&picture.public_id)
    .bind(&picture.url)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Partial update; absent fields keep their stored value.
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if data.price.is_some_and(|p| p < 0.0) {
        return Err(RepoError::Validation("price cannot be negative".into()));
    }
    if data.buy_price.is_some_and(|p| p < 0.0) {
        return Err(RepoError::Validation("buyPrice cannot be negative".into()));
    }

    let (picture_public_id, picture_url) = match data.picture {
        Some(p) => (Some(p.public_id), Some(p.url)),
        None => (None, None),
    };

    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), category = COALESCE(?2, category), \
         price = COALESCE(?3, price), buy_price = COALESCE(?4, buy_price), \
         stock = COALESCE(?5, stock), picture_public_id = COALESCE(?6, picture_public_id), \
         picture_url = COALESCE(?7, picture_url) WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(data.category)
    .bind(data.price)
    .bind(data.buy_price)
    .bind(data.stock)
    .bind(&picture_public_id)
    .bind(&picture_url)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}

/// Atomically decrement `stock` by `quantity` and return the updated row.
///
/// A single UPDATE statement (never read-compute-write), so concurrent
/// decrements against the same product cannot lose updates. Stock is NOT
/// floored at zero: the transactional path only subtracts, matching the
/// documented ledger behavior.
///
/// Takes any executor so the sale-creation transaction can call it on its
/// own connection.
pub async fn decrement_stock(
    executor: impl sqlx::SqliteExecutor<'_>,
    id: i64,
    quantity: i64,
) -> RepoResult<Product> {
    let sql = format!(
        "UPDATE product SET stock = stock - ?1 WHERE id = ?2 \
         RETURNING {COLUMNS}"
    );
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(quantity)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    product.ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}
