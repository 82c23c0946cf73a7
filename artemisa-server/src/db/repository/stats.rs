//! Statistics Repository
//!
//! Deterministic folds over recorded sales. Every function is a pure
//! read: repeated calls with no intervening writes return identical
//! results.

use super::{RepoResult, product};
use shared::models::{CategorySales, MonthlySales, PaymentMethodSales, Picture, TopProduct};
use sqlx::SqlitePool;

/// Sale counts for the two given months-of-year (1-12). Matching is by
/// month number only, like the storefront's original aggregation.
pub async fn monthly_sales(
    pool: &SqlitePool,
    current_month: u32,
    previous_month: u32,
) -> RepoResult<MonthlySales> {
    let rows = sqlx::query_as::<_, (i64, i64)>(
        "SELECT CAST(strftime('%m', created_at / 1000, 'unixepoch') AS INTEGER) AS month, \
         COUNT(*) AS cnt FROM sale \
         WHERE CAST(strftime('%m', created_at / 1000, 'unixepoch') AS INTEGER) IN (?1, ?2) \
         GROUP BY month",
    )
    .bind(current_month as i64)
    .bind(previous_month as i64)
    .fetch_all(pool)
    .await?;

    let count_for = |month: u32| {
        rows.iter()
            .find(|(m, _)| *m == month as i64)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    };

    Ok(MonthlySales {
        last_month: count_for(previous_month),
        actual_month: count_for(current_month),
    })
}

/// Quantity sold per category, line items flattened across all sales,
/// largest first.
pub async fn sales_by_category(pool: &SqlitePool) -> RepoResult<Vec<CategorySales>> {
    let rows = sqlx::query_as::<_, CategorySales>(
        "SELECT category, SUM(quantity) AS total_quantity FROM sale_item \
         GROUP BY category ORDER BY total_quantity DESC, category",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sale count per payment type. A sale paid with two types counts once
/// under each.
pub async fn sales_by_payment(pool: &SqlitePool) -> RepoResult<Vec<PaymentMethodSales>> {
    let rows = sqlx::query_as::<_, PaymentMethodSales>(
        "SELECT pay_type, COUNT(*) AS count FROM sale_payment \
         GROUP BY pay_type ORDER BY count DESC, pay_type",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// The three most-sold products by line-item appearances (one per
/// appearance, regardless of quantity). Ties break by first appearance in
/// the ledger (`MIN(sale_item.id)`), so the ranking is stable. Current
/// product details are re-fetched for display; products no longer in the
/// catalog keep their count with placeholder fields.
pub async fn top_products(pool: &SqlitePool) -> RepoResult<Vec<TopProduct>> {
    let counts = sqlx::query_as::<_, (i64, i64)>(
        "SELECT product_id, COUNT(*) AS cnt FROM sale_item \
         GROUP BY product_id ORDER BY cnt DESC, MIN(id) LIMIT 3",
    )
    .fetch_all(pool)
    .await?;

    let mut top = Vec::with_capacity(counts.len());
    for (product_id, count) in counts {
        let entry = match product::find_by_id(pool, product_id).await? {
            Some(p) => TopProduct {
                id: p.id,
                name: p.name,
                category: Some(p.category),
                price: p.price,
                buy_price: p.buy_price,
                stock: p.stock,
                code: Some(p.code),
                picture: p.picture,
                count,
            },
            None => TopProduct {
                id: product_id,
                name: "Desconocido".to_string(),
                category: None,
                price: 0.0,
                buy_price: 0.0,
                stock: 0,
                code: None,
                picture: Picture::default(),
                count,
            },
        };
        top.push(entry);
    }
    Ok(top)
}
