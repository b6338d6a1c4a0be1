use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::product::Product;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: i32,
    pub product_id: i32,
    pub amount: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

/// Stock plus its product, which in turn carries the product's category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockWithRelations {
    #[serde(flatten)]
    pub stock: Stock,
    pub product: Option<ProductWithCategory>,
}

#[derive(Debug, FromRow)]
pub struct StockListRow {
    pub id: i32,
    pub product_id: i32,
    pub amount: i32,
    pub unit: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub prod_id: Option<i32>,
    pub prod_code: Option<String>,
    pub prod_name: Option<String>,
    pub prod_description: Option<String>,
    pub prod_unit: Option<String>,
    pub prod_in_stock: Option<bool>,
    pub prod_category_id: Option<i32>,
    pub prod_created_at: Option<DateTime<Utc>>,
    pub prod_updated_at: Option<DateTime<Utc>>,
    pub prod_deleted_at: Option<DateTime<Utc>>,
    pub cat_id: Option<i32>,
    pub cat_code: Option<String>,
    pub cat_name: Option<String>,
    pub cat_description: Option<String>,
    pub cat_created_at: Option<DateTime<Utc>>,
    pub cat_updated_at: Option<DateTime<Utc>>,
    pub cat_deleted_at: Option<DateTime<Utc>>,
}

impl From<StockListRow> for StockWithRelations {
    fn from(row: StockListRow) -> Self {
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
        let product = match (row.prod_id, row.prod_code, row.prod_name) {
            (Some(id), Some(code), Some(name)) => Some(ProductWithCategory {
                product: Product {
                    id,
                    code,
                    name,
                    description: row.prod_description,
                    unit: row.prod_unit.unwrap_or_default(),
                    in_stock: row.prod_in_stock.unwrap_or(false),
                    category_id: row.prod_category_id.unwrap_or(0),
                    created_at: row.prod_created_at.unwrap_or(row.created_at),
                    updated_at: row.prod_updated_at.unwrap_or(row.updated_at),
                    deleted_at: row.prod_deleted_at,
                },
                category,
            }),
            _ => None,
        };
        StockWithRelations {
            stock: Stock {
                id: row.id,
                product_id: row.product_id,
                amount: row.amount,
                unit: row.unit,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            product,
        }
    }
}
