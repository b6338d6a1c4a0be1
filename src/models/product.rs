use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::stock::Stock;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub in_stock: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Product plus its category and the most recent stock row, as the list
/// endpoint returns it. A soft-deleted category serializes as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithRelations {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
    pub stock: Option<Stock>,
}

/// Flat row produced by the product list join; aliased related columns are
/// folded back into the nested shape.
#[derive(Debug, FromRow)]
pub struct ProductListRow {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub in_stock: bool,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub cat_id: Option<i32>,
    pub cat_code: Option<String>,
    pub cat_name: Option<String>,
    pub cat_description: Option<String>,
    pub cat_created_at: Option<DateTime<Utc>>,
    pub cat_updated_at: Option<DateTime<Utc>>,
    pub cat_deleted_at: Option<DateTime<Utc>>,
    pub stock_id: Option<i32>,
    pub stock_product_id: Option<i32>,
    pub stock_amount: Option<i32>,
    pub stock_unit: Option<String>,
    pub stock_created_at: Option<DateTime<Utc>>,
    pub stock_updated_at: Option<DateTime<Utc>>,
    pub stock_deleted_at: Option<DateTime<Utc>>,
}

impl From<ProductListRow> for ProductWithRelations {
    fn from(row: ProductListRow) -> Self {
        let category = match (row.cat_id, row.cat_code, row.cat_name) {
            (Some(id), Some(code), Some(name)) => Some(Category {
                id,
                code,
                name,
                description: row.cat_description,
                created_at: row.cat_created_at.unwrap_or(row.created_at),
                updated_at: row.cat_updated_at.unwrap_or(row.updated_at),
                deleted_at: row.cat_deleted_at,
            }),
            _ => None,
        };
        let stock = match (row.stock_id, row.stock_product_id) {
            (Some(id), Some(product_id)) => Some(Stock {
                id,
                product_id,
                amount: row.stock_amount.unwrap_or(0),
                unit: row.stock_unit.unwrap_or_default(),
                created_at: row.stock_created_at.unwrap_or(row.created_at),
                updated_at: row.stock_updated_at.unwrap_or(row.updated_at),
                deleted_at: row.stock_deleted_at,
            }),
            _ => None,
        };
        ProductWithRelations {
            product: Product {
                id: row.id,
                code: row.code,
                name: row.name,
                description: row.description,
                unit: row.unit,
                in_stock: row.in_stock,
                category_id: row.category_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            category,
            stock,
        }
    }
}
