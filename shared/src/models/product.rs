//! Product Model

use serde::{Deserialize, Serialize};

/// Placeholder picture shown until a real one is attached to the product.
pub const DEFAULT_PICTURE_URL: &str =
    "https://res.cloudinary.com/appsftw/image/upload/v1725911983/mayw65ww5edphgs4rfng.jpg";

/// Product category (固定分类集合)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ProductCategory {
    Belleza,
    Salud,
    Perfumes,
    Accesorios,
    Tenis,
    #[serde(rename = "Camisas/Camisetas")]
    #[cfg_attr(feature = "db", sqlx(rename = "Camisas/Camisetas"))]
    CamisasCamisetas,
    Pantalones,
    Maquillaje,
}

impl Default for ProductCategory {
    fn default() -> Self {
        Self::Maquillaje
    }
}

/// Picture reference handed back by the external object store.
///
/// The store itself is an external collaborator; only the
/// `{public_id, url}` pair is persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Picture {
    pub public_id: String,
    pub url: String,
}

impl Default for Picture {
    fn default() -> Self {
        Self {
            public_id: String::new(),
            url: DEFAULT_PICTURE_URL.to_string(),
        }
    }
}

/// Product entity
///
/// `code` is a human-facing sequential identifier (first product gets
/// 1000), distinct from the storage `id`. `stock` is the authoritative
/// current count; the sale path only ever subtracts from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    pub buy_price: f64,
    pub stock: i64,
    pub code: i64,
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub picture: Picture,
    #[serde(rename = "created")]
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub category: ProductCategory,
    pub price: f64,
    pub buy_price: Option<f64>,
    pub stock: Option<i64>,
    pub picture: Option<Picture>,
}

/// Update product payload (partial; absent fields keep their value)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub price: Option<f64>,
    pub buy_price: Option<f64>,
    pub stock: Option<i64>,
    pub picture: Option<Picture>,
}
