//! Sale Repository (Sale Recorder)
//!
//! The transactional core: one sale = one SQLite transaction covering the
//! consecutive allocation, the sale row, its snapshot line items, its
//! payment rows and every stock decrement. Any failure rolls the whole
//! sale back, so stock and the sales ledger stay consistent.

use super::{RepoError, RepoResult, product};
use shared::models::{PayType, Sale, SaleCreate, SaleItem};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Scalar sale columns; items and payments are loaded separately.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: i64,
    id_client: Option<String>,
    total_price: f64,
    money_returned: f64,
    consecutive: i64,
    created_at: i64,
}

const ITEM_COLUMNS: &str = "product_id, name, category, price, stock, \
     picture_public_id AS public_id, picture_url AS url, product_created_at, quantity";

async fn load_items(pool: &SqlitePool, sale_id: i64) -> RepoResult<Vec<SaleItem>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM sale_item WHERE sale_id = ? ORDER BY id");
    let items = sqlx::query_as::<_, SaleItem>(&sql)
        .bind(sale_id)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

async fn load_payments(pool: &SqlitePool, sale_id: i64) -> RepoResult<Vec<PayType>> {
    let payments =
        sqlx::query_scalar::<_, PayType>("SELECT pay_type FROM sale_payment WHERE sale_id = ? ORDER BY id")
            .bind(sale_id)
            .fetch_all(pool)
            .await?;
    Ok(payments)
}

async fn assemble(pool: &SqlitePool, row: SaleRow) -> RepoResult<Sale> {
    let products = load_items(pool, row.id).await?;
    let pay_type = load_payments(pool, row.id).await?;
    Ok(Sale {
        id: row.id,
        id_client: row.id_client,
        total_price: row.total_price,
        money_returned: row.money_returned,
        consecutive: row.consecutive,
        pay_type,
        products,
        created_at: row.created_at,
    })
}

/// All sales in creation order, with embedded line items and payments.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Sale>> {
    let rows = sqlx::query_as::<_, SaleRow>(
        "SELECT id, id_client, total_price, money_returned, consecutive, created_at \
         FROM sale ORDER BY consecutive",
    )
    .fetch_all(pool)
    .await?;

    let mut sales = Vec::with_capacity(rows.len());
    for row in rows {
        sales.push(assemble(pool, row).await?);
    }
    Ok(sales)
}

/// Highest consecutive handed out so far, if any sale exists.
pub async fn last_consecutive(pool: &SqlitePool) -> RepoResult<Option<i64>> {
    let max = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(consecutive) FROM sale")
        .fetch_one(pool)
        .await?;
    Ok(max)
}

/// Record a sale.
///
/// All referenced products must exist; otherwise the call fails with
/// `NotFound` naming the offending ids and nothing is written. Line items
/// are persisted exactly as submitted (the caller's snapshot, not a
/// re-fetched one).
///
/// `consecutive` is computed as `MAX(consecutive) + 1` by the INSERT
/// itself. The insert is the first statement of the transaction, so the
/// write lock is held from the moment the maximum is read until commit;
/// two concurrent sales can never observe the same maximum. The UNIQUE
/// constraint on `consecutive` backstops that guarantee.
pub async fn create(pool: &SqlitePool, data: SaleCreate) -> RepoResult<Sale> {
    if data.total_price < 0.0 {
        return Err(RepoError::Validation("totalPrice cannot be negative".into()));
    }
    if data.money_returned.is_some_and(|m| m < 0.0) {
        return Err(RepoError::Validation(
            "moneyReturned cannot be negative".into(),
        ));
    }
    if data.products.iter().any(|item| item.quantity < 1) {
        return Err(RepoError::Validation(
            "line item quantity must be at least 1".into(),
        ));
    }

    // Existence pre-check: report every missing product, not just the
    // first. Products deleted between this check and the decrement below
    // are still caught inside the transaction and roll the sale back.
    let mut missing = Vec::new();
    for item in &data.products {
        let found = sqlx::query_scalar::<_, i64>("SELECT id FROM product WHERE id = ?")
            .bind(item.product_id)
            .fetch_optional(pool)
            .await?;
        if found.is_none() && !missing.contains(&item.product_id) {
            missing.push(item.product_id);
        }
    }
    if !missing.is_empty() {
        let ids: Vec<String> = missing.iter().map(|id| id.to_string()).collect();
        return Err(RepoError::NotFound(format!(
            "Products not found: {}",
            ids.join(", ")
        )));
    }

    let id = snowflake_id();
    let created_at = now_millis();

    let mut tx = pool.begin().await?;

    let consecutive = sqlx::query_scalar::<_, i64>(
        "INSERT INTO sale (id, id_client, total_price, money_returned, consecutive, created_at) \
         VALUES (?1, ?2, ?3, ?4, (SELECT COALESCE(MAX(consecutive), 0) + 1 FROM sale), ?5) \
         RETURNING consecutive",
    )
    .bind(id)
    .bind(&data.id_client)
    .bind(data.total_price)
    .bind(data.money_returned.unwrap_or(0.0))
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    for item in &data.products {
        sqlx::query(
            "INSERT INTO sale_item (sale_id, product_id, name, category, price, stock, \
             picture_public_id, picture_url, product_created_at, quantity) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(id)
        .bind(item.product_id)
        .bind(&item.name)
        .bind(item.category)
        .bind(item.price)
        .bind(item.stock)
        .bind(&item.picture.public_id)
        .bind(&item.picture.url)
        .bind(item.product_created_at)
        .bind(item.quantity)
        .execute(&mut *tx)
        .await?;
    }

    for pay_type in &data.pay_type {
        sqlx::query("INSERT INTO sale_payment (sale_id, pay_type) VALUES (?1, ?2)")
            .bind(id)
            .bind(pay_type)
            .execute(&mut *tx)
            .await?;
    }

    for item in &data.products {
        product::decrement_stock(&mut *tx, item.product_id, item.quantity).await?;
    }

    tx.commit().await?;

    tracing::info!(sale_id = id, consecutive, items = data.products.len(), "Sale recorded");

    let products = data
        .products
        .into_iter()
        .map(|item| SaleItem {
            product_id: item.product_id,
            name: item.name,
            category: item.category,
            price: item.price,
            stock: item.stock,
            picture: item.picture,
            product_created_at: item.product_created_at,
            quantity: item.quantity,
        })
        .collect();

    Ok(Sale {
        id,
        id_client: data.id_client,
        total_price: data.total_price,
        money_returned: data.money_returned.unwrap_or(0.0),
        consecutive,
        pay_type: data.pay_type,
        products,
        created_at,
    })
}

/// Delete one sale. Decremented stock is NOT restored: sales are a
/// historical ledger, deletion is an administrative purge.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM sale WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Sale {id} not found")));
    }
    Ok(())
}

/// Bulk removal of every sale. Irreversible; stock is untouched.
pub async fn delete_all(pool: &SqlitePool) -> RepoResult<()> {
    sqlx::query("DELETE FROM sale").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::repository::product::tests::{create_product_table, sample_create};
    use shared::models::{Picture, ProductCategory, SaleItemCreate};
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool with the full sales schema. Single connection:
    /// `sqlite::memory:` databases are per-connection.
    pub(crate) async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query("PRAGMA foreign_keys = ON;")
            .execute(&pool)
            .await
            .unwrap();

        create_product_table(&pool).await;
        create_sale_tables(&pool).await;
        pool
    }

    pub(crate) async fn create_sale_tables(pool: &SqlitePool) {
        sqlx::query(
            "CREATE TABLE sale (
                id INTEGER PRIMARY KEY,
                id_client TEXT,
                total_price REAL NOT NULL DEFAULT 0,
                money_returned REAL NOT NULL DEFAULT 0,
                consecutive INTEGER NOT NULL UNIQUE,
                created_at INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE sale_item (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sale_id INTEGER NOT NULL REFERENCES sale(id) ON DELETE CASCADE,
                product_id INTEGER NOT NULL,
                name TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL,
                price REAL NOT NULL DEFAULT 0,
                stock INTEGER NOT NULL DEFAULT 0,
                picture_public_id TEXT NOT NULL DEFAULT '',
                picture_url TEXT NOT NULL DEFAULT '',
                product_created_at INTEGER NOT NULL DEFAULT 0,
                quantity INTEGER NOT NULL
            )",
        )
        .execute(pool)
        .await
        .unwrap();

        sqlx::query(
            "CREATE TABLE sale_payment (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sale_id INTEGER NOT NULL REFERENCES sale(id) ON DELETE CASCADE,
                pay_type TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await
        .unwrap();
    }

    pub(crate) fn line_item(product: &shared::models::Product, quantity: i64) -> SaleItemCreate {
        SaleItemCreate {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category,
            price: product.price,
            stock: product.stock,
            picture: product.picture.clone(),
            product_created_at: product.created_at,
            quantity,
        }
    }

    pub(crate) fn sale_for(items: Vec<SaleItemCreate>, total: f64) -> SaleCreate {
        SaleCreate {
            id_client: None,
            total_price: total,
            pay_type: vec![PayType::Efectivo],
            products: items,
            money_returned: None,
        }
    }

    #[tokio::test]
    async fn first_sale_gets_consecutive_1_and_decrements_stock() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 5))
            .await
            .unwrap();

        let sale = create(&pool, sale_for(vec![line_item(&p, 2)], 20.0))
            .await
            .unwrap();
        assert_eq!(sale.consecutive, 1);
        assert_eq!(sale.products.len(), 1);
        assert_eq!(sale.products[0].quantity, 2);

        let fresh = product::find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 3);
    }

    #[tokio::test]
    async fn consecutives_increase_in_creation_order() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 100))
            .await
            .unwrap();

        for expected in 1..=4 {
            let sale = create(&pool, sale_for(vec![line_item(&p, 1)], 10.0))
                .await
                .unwrap();
            assert_eq!(sale.consecutive, expected);
        }
        assert_eq!(last_consecutive(&pool).await.unwrap(), Some(4));
    }

    #[tokio::test]
    async fn missing_product_fails_and_rolls_back() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 5))
            .await
            .unwrap();

        let mut ghost = line_item(&p, 1);
        ghost.product_id = 424242;

        let err = create(&pool, sale_for(vec![line_item(&p, 2), ghost], 30.0))
            .await
            .unwrap_err();
        match err {
            RepoError::NotFound(msg) => assert!(msg.contains("424242")),
            other => panic!("expected NotFound, got {other:?}"),
        }

        // Nothing was written: no sale, stock untouched
        assert_eq!(find_all(&pool).await.unwrap().len(), 0);
        let fresh = product::find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 5);
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 5))
            .await
            .unwrap();
        let err = create(&pool, sale_for(vec![line_item(&p, 0)], 0.0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn items_are_stored_as_submitted_snapshots() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 5))
            .await
            .unwrap();
        create(&pool, sale_for(vec![line_item(&p, 2)], 20.0))
            .await
            .unwrap();

        // Rename the product and change its price after the sale
        product::update(
            &pool,
            p.id,
            shared::models::ProductUpdate {
                name: Some("Renamed".into()),
                category: None,
                price: Some(99.0),
                buy_price: None,
                stock: None,
                picture: None,
            },
        )
        .await
        .unwrap();

        let sales = find_all(&pool).await.unwrap();
        assert_eq!(sales.len(), 1);
        let item = &sales[0].products[0];
        // The snapshot still shows the product as it was sold
        assert_eq!(item.name, "X");
        assert_eq!(item.price, 10.0);
        assert_eq!(item.stock, 5);
        assert_eq!(item.category, ProductCategory::Belleza);
        assert_eq!(item.picture, Picture::default());
    }

    #[tokio::test]
    async fn delete_does_not_restore_stock() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 5))
            .await
            .unwrap();
        let sale = create(&pool, sale_for(vec![line_item(&p, 2)], 20.0))
            .await
            .unwrap();

        delete(&pool, sale.id).await.unwrap();

        assert_eq!(find_all(&pool).await.unwrap().len(), 0);
        let fresh = product::find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(fresh.stock, 3); // still decremented
    }

    #[tokio::test]
    async fn delete_unknown_sale_is_not_found() {
        let pool = test_pool().await;
        let err = delete(&pool, 7).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_all_restarts_numbering() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 100))
            .await
            .unwrap();
        create(&pool, sale_for(vec![line_item(&p, 1)], 10.0))
            .await
            .unwrap();
        create(&pool, sale_for(vec![line_item(&p, 1)], 10.0))
            .await
            .unwrap();

        delete_all(&pool).await.unwrap();
        assert_eq!(last_consecutive(&pool).await.unwrap(), None);

        // Numbering restarts at 1, exactly like the MAX+1 contract says
        let sale = create(&pool, sale_for(vec![line_item(&p, 1)], 10.0))
            .await
            .unwrap();
        assert_eq!(sale.consecutive, 1);
    }

    #[tokio::test]
    async fn payments_round_trip() {
        let pool = test_pool().await;
        let p = product::create(&pool, sample_create("X", 10.0, 5))
            .await
            .unwrap();
        let mut data = sale_for(vec![line_item(&p, 1)], 10.0);
        data.pay_type = vec![PayType::Efectivo, PayType::Tarjeta];
        create(&pool, data).await.unwrap();

        let sales = find_all(&pool).await.unwrap();
        assert_eq!(sales[0].pay_type, vec![PayType::Efectivo, PayType::Tarjeta]);
    }

    #[tokio::test]
    async fn empty_sale_is_allowed() {
        // A sale with no line items records the payment only, matching the
        // storefront's empty-cart edge case.
        let pool = test_pool().await;
        let sale = create(&pool, sale_for(vec![], 0.0)).await.unwrap();
        assert_eq!(sale.consecutive, 1);
        assert!(sale.products.is_empty());
    }
}
