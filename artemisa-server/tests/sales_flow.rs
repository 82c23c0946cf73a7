//! End-to-end tests over a real (temp-file) database: migrations, the
//! full sale flow, and cross-connection concurrency.

use artemisa_server::auth::{JwtConfig, password};
use artemisa_server::core::{Config, ServerState};
use artemisa_server::db::DbService;
use artemisa_server::db::repository::{admin, product, sale};
use shared::models::{PayType, Product, ProductCategory, ProductCreate, SaleCreate, SaleItemCreate};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("artemisa.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
    (dir, db.pool)
}

fn product_data(name: &str, price: f64, stock: i64) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        category: ProductCategory::Belleza,
        price,
        buy_price: None,
        stock: Some(stock),
        picture: None,
    }
}

fn sale_data(product: &Product, quantity: i64, total: f64) -> SaleCreate {
    SaleCreate {
        id_client: None,
        total_price: total,
        pay_type: vec![PayType::Efectivo],
        products: vec![SaleItemCreate {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category,
            price: product.price,
            stock: product.stock,
            picture: product.picture.clone(),
            product_created_at: product.created_at,
            quantity,
        }],
        money_returned: None,
    }
}

#[tokio::test]
async fn full_sale_lifecycle() {
    let (_dir, pool) = test_db().await;

    // Create product "X": first code is 1000
    let x = product::create(&pool, product_data("X", 10.0, 5))
        .await
        .unwrap();
    assert_eq!(x.code, 1000);

    // Sell 2 units: consecutive 1, stock drops to 3
    let sale = sale::create(&pool, sale_data(&x, 2, 20.0)).await.unwrap();
    assert_eq!(sale.consecutive, 1);
    let x_after = product::find_by_id(&pool, x.id).await.unwrap().unwrap();
    assert_eq!(x_after.stock, 3);

    // Deleting the sale does not restore stock
    sale::delete(&pool, sale.id).await.unwrap();
    let x_final = product::find_by_id(&pool, x.id).await.unwrap().unwrap();
    assert_eq!(x_final.stock, 3);
    assert_eq!(sale::last_consecutive(&pool).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sales_get_unique_gapless_consecutives() {
    let (_dir, pool) = test_db().await;
    let p = product::create(&pool, product_data("X", 10.0, 1000))
        .await
        .unwrap();

    const N: usize = 8;
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..N {
        let pool = pool.clone();
        let p = p.clone();
        tasks.spawn(async move { sale::create(&pool, sale_data(&p, 1, 10.0)).await });
    }

    let mut consecutives = Vec::new();
    while let Some(res) = tasks.join_next().await {
        consecutives.push(res.unwrap().unwrap().consecutive);
    }

    consecutives.sort_unstable();
    let expected: Vec<i64> = (1..=N as i64).collect();
    assert_eq!(consecutives, expected); // unique, no duplicates, no gaps
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_decrements_sum_correctly() {
    let (_dir, pool) = test_db().await;
    let p = product::create(&pool, product_data("X", 10.0, 500))
        .await
        .unwrap();

    // 10 concurrent sales of 3 units each against the same product
    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..10 {
        let pool = pool.clone();
        let p = p.clone();
        tasks.spawn(async move { sale::create(&pool, sale_data(&p, 3, 30.0)).await });
    }
    while let Some(res) = tasks.join_next().await {
        res.unwrap().unwrap();
    }

    let fresh = product::find_by_id(&pool, p.id).await.unwrap().unwrap();
    assert_eq!(fresh.stock, 500 - 10 * 3); // no lost updates
}

#[tokio::test]
async fn migrations_are_idempotent_across_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("artemisa.db");
    let path = db_path.to_str().unwrap();

    {
        let db = DbService::new(path).await.unwrap();
        product::create(&db.pool, product_data("X", 10.0, 5))
            .await
            .unwrap();
        db.pool.close().await;
    }

    // Second open re-runs the migrator against the same file
    let db = DbService::new(path).await.unwrap();
    let products = product::find_all(&db.pool).await.unwrap();
    assert_eq!(products.len(), 1);
    // Code allocation continues from the persisted maximum
    let next = product::create(&db.pool, product_data("Y", 5.0, 2))
        .await
        .unwrap();
    assert_eq!(next.code, 1001);
}

#[tokio::test]
async fn state_initialize_bootstraps_admin_once() {
    let dir = TempDir::new().unwrap();

    let config = Config {
        work_dir: dir.path().to_str().unwrap().to_string(),
        http_port: 0,
        database_path: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-key-long-enough!".to_string(),
            expiration_minutes: 60,
            issuer: "artemisa-server".to_string(),
        },
        environment: "development".to_string(),
        request_timeout_ms: 30000,
        cors_origins: vec![],
        log_level: "info".to_string(),
        log_dir: None,
        admin_email: Some("ana@tienda.co".to_string()),
        admin_password: Some("hunter2".to_string()),
    };

    let state = ServerState::initialize(&config).await.unwrap();
    let ana = admin::find_by_email(&state.pool, "ana@tienda.co")
        .await
        .unwrap()
        .expect("bootstrap admin should exist");
    assert!(password::verify_password("hunter2", &ana.password).unwrap());
    assert_eq!(ana.role, "Admin");

    // A second initialize against the same database must not duplicate it
    let state2 = ServerState::initialize(&config).await.unwrap();
    assert_eq!(admin::count(&state2.pool).await.unwrap(), 1);

    // And the issued token authenticates as that admin
    let token = state.jwt_service.generate_token(&ana).unwrap();
    let claims = state.jwt_service.validate_token(&token).unwrap();
    assert_eq!(claims.sub, ana.id.to_string());
}
