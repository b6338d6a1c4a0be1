use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::database::Database;
use crate::errors::ApiError;
use crate::models::listing::{
    contains_pattern, non_empty, offset, parse_bool_literal, parse_i32, parse_timestamp,
    positive_or, Paged, Pagination, SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use crate::models::product::{ProductListRow, ProductWithRelations};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    /// Substring match against the related category's name.
    pub category: Option<String>,
    pub unit: Option<String>,
    /// Applied only when literally "true" or "false".
    pub in_stock: Option<String>,
    pub created_at_from: Option<String>,
    pub created_at_to: Option<String>,
}

const SELECT_SQL: &str = "\
SELECT p.id, p.code, p.name, p.description, p.unit, p.in_stock, p.category_id, \
p.created_at, p.updated_at, p.deleted_at, \
c.id AS cat_id, c.code AS cat_code, c.name AS cat_name, c.description AS cat_description, \
c.created_at AS cat_created_at, c.updated_at AS cat_updated_at, c.deleted_at AS cat_deleted_at, \
s.id AS stock_id, s.product_id AS stock_product_id, s.amount AS stock_amount, s.unit AS stock_unit, \
s.created_at AS stock_created_at, s.updated_at AS stock_updated_at, s.deleted_at AS stock_deleted_at \
FROM products p \
LEFT JOIN categories c ON c.id = p.category_id AND c.deleted_at IS NULL \
LEFT JOIN LATERAL (\
SELECT * FROM stocks s2 WHERE s2.product_id = p.id AND s2.deleted_at IS NULL \
ORDER BY s2.created_at DESC, s2.id DESC LIMIT 1\
) s ON TRUE";

const COUNT_SQL: &str = "\
SELECT COUNT(*) FROM products p \
LEFT JOIN categories c ON c.id = p.category_id AND c.deleted_at IS NULL";

// GET /api/product
pub async fn list_products(
    State(db): State<Database>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Paged<ProductWithRelations>>, ApiError> {
    let paged = fetch_products(&db, &query)
        .await
        .map_err(|err| ApiError::fetch("products", err))?;
    Ok(Json(paged))
}

pub async fn fetch_products(
    db: &Database,
    query: &ProductListQuery,
) -> Result<Paged<ProductWithRelations>, sqlx::Error> {
    let page = positive_or(query.page.as_deref(), DEFAULT_PAGE);
    let page_size = positive_or(query.page_size.as_deref(), DEFAULT_PAGE_SIZE);
    let order = SortOrder::parse(query.sort_order.as_deref());

    let mut select = QueryBuilder::<Postgres>::new(SELECT_SQL);
    push_filters(&mut select, query);
    select.push(format!(
        " ORDER BY {} {}",
        sort_column(query.sort_by.as_deref()),
        order.as_sql()
    ));
    select.push(" LIMIT ");
    select.push_bind(page_size);
    select.push(" OFFSET ");
    select.push_bind(offset(page, page_size));

    let mut count = QueryBuilder::<Postgres>::new(COUNT_SQL);
    push_filters(&mut count, query);

    let rows = select.build_query_as::<ProductListRow>().fetch_all(db);
    let total = count.build_query_scalar::<i64>().fetch_one(db);
    let (rows, total) = tokio::try_join!(rows, total)?;

    Ok(Paged {
        data: rows.into_iter().map(ProductWithRelations::from).collect(),
        pagination: Pagination::new(page, page_size, total),
    })
}

fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("code") => "p.code",
        Some("name") => "p.name",
        Some("unit") => "p.unit",
        Some("inStock") => "p.in_stock",
        Some("createdAt") => "p.created_at",
        Some("updatedAt") => "p.updated_at",
        Some("deletedAt") => "p.deleted_at",
        _ => "p.id",
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, query: &ProductListQuery) {
    qb.push(" WHERE p.deleted_at IS NULL");
    if let Some(id) = parse_i32(query.id.as_deref()) {
        qb.push(" AND p.id = ");
        qb.push_bind(id);
    }
    if let Some(code) = non_empty(query.code.as_deref()) {
        qb.push(" AND p.code LIKE ");
        qb.push_bind(contains_pattern(code));
    }
    if let Some(name) = non_empty(query.name.as_deref()) {
        qb.push(" AND p.name LIKE ");
        qb.push_bind(contains_pattern(name));
    }
    if let Some(category) = non_empty(query.category.as_deref()) {
        qb.push(" AND c.name LIKE ");
        qb.push_bind(contains_pattern(category));
    }
    if let Some(unit) = non_empty(query.unit.as_deref()) {
        qb.push(" AND p.unit LIKE ");
        qb.push_bind(contains_pattern(unit));
    }
    if let Some(in_stock) = parse_bool_literal(query.in_stock.as_deref()) {
        qb.push(" AND p.in_stock = ");
        qb.push_bind(in_stock);
    }
    if let Some(from) = parse_timestamp(query.created_at_from.as_deref()) {
        qb.push(" AND p.created_at >= ");
        qb.push_bind(from);
    }
    if let Some(to) = parse_timestamp(query.created_at_to.as_deref()) {
        qb.push(" AND p.created_at <= ");
        qb.push_bind(to);
    }
}
