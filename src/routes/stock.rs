use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::database::Database;
use crate::errors::ApiError;
use crate::models::listing::{
    contains_pattern, non_empty, offset, parse_i32, parse_timestamp, positive_or, Paged,
    Pagination, SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use crate::models::stock::{StockListRow, StockWithRelations};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub id: Option<String>,
    /// Substring match against the related product's name.
    pub product: Option<String>,
    /// Exact numeric match, ignored when non-numeric.
    pub amount: Option<String>,
    pub unit: Option<String>,
    pub created_at_from: Option<String>,
    pub created_at_to: Option<String>,
}

const SELECT_SQL: &str = "\
SELECT s.id, s.product_id, s.amount, s.unit, s.created_at, s.updated_at, s.deleted_at, \
p.id AS prod_id, p.code AS prod_code, p.name AS prod_name, p.description AS prod_description, \
p.unit AS prod_unit, p.in_stock AS prod_in_stock, p.category_id AS prod_category_id, \
p.created_at AS prod_created_at, p.updated_at AS prod_updated_at, p.deleted_at AS prod_deleted_at, \
c.id AS cat_id, c.code AS cat_code, c.name AS cat_name, c.description AS cat_description, \
c.created_at AS cat_created_at, c.updated_at AS cat_updated_at, c.deleted_at AS cat_deleted_at \
FROM stocks s \
LEFT JOIN products p ON p.id = s.product_id \
LEFT JOIN categories c ON c.id = p.category_id AND c.deleted_at IS NULL";

const COUNT_SQL: &str = "\
SELECT COUNT(*) FROM stocks s \
LEFT JOIN products p ON p.id = s.product_id";

// GET /api/stock
pub async fn list_stocks(
    State(db): State<Database>,
    Query(query): Query<StockListQuery>,
) -> Result<Json<Paged<StockWithRelations>>, ApiError> {
    let paged = fetch_stocks(&db, &query)
        .await
        .map_err(|err| ApiError::fetch("stocks", err))?;
    Ok(Json(paged))
}

pub async fn fetch_stocks(
    db: &Database,
    query: &StockListQuery,
) -> Result<Paged<StockWithRelations>, sqlx::Error> {
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

    let rows = select.build_query_as::<StockListRow>().fetch_all(db);
    let total = count.build_query_scalar::<i64>().fetch_one(db);
    let (rows, total) = tokio::try_join!(rows, total)?;

    Ok(Paged {
        data: rows.into_iter().map(StockWithRelations::from).collect(),
        pagination: Pagination::new(page, page_size, total),
    })
}

/// Includes the virtual key `product_name`, which orders by the joined
/// product's name rather than a column of stocks itself.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("productId") => "s.product_id",
        Some("amount") => "s.amount",
        Some("unit") => "s.unit",
        Some("createdAt") => "s.created_at",
        Some("updatedAt") => "s.updated_at",
        Some("deletedAt") => "s.deleted_at",
        Some("product_name") => "p.name",
        _ => "s.id",
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, query: &StockListQuery) {
    qb.push(" WHERE s.deleted_at IS NULL");
    if let Some(id) = parse_i32(query.id.as_deref()) {
        qb.push(" AND s.id = ");
        qb.push_bind(id);
    }
    if let Some(product) = non_empty(query.product.as_deref()) {
        qb.push(" AND p.name LIKE ");
        qb.push_bind(contains_pattern(product));
    }
    if let Some(amount) = parse_i32(query.amount.as_deref()) {
        qb.push(" AND s.amount = ");
        qb.push_bind(amount);
    }
    if let Some(unit) = non_empty(query.unit.as_deref()) {
        qb.push(" AND s.unit LIKE ");
        qb.push_bind(contains_pattern(unit));
    }
    if let Some(from) = parse_timestamp(query.created_at_from.as_deref()) {
        qb.push(" AND s.created_at >= ");
        qb.push_bind(from);
    }
    if let Some(to) = parse_timestamp(query.created_at_to.as_deref()) {
        qb.push(" AND s.created_at <= ");
        qb.push_bind(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters_sql(query: &StockListQuery) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_filters(&mut qb, query);
        qb.sql().to_string()
    }

    #[test]
    fn product_filter_targets_joined_product_name() {
        let query = StockListQuery {
            product: Some("Apple".into()),
            ..Default::default()
        };
        assert_eq!(
            filters_sql(&query),
            " WHERE s.deleted_at IS NULL AND p.name LIKE $1"
        );
    }

    #[test]
    fn amount_filter_is_exact_and_ignores_garbage() {
        let query = StockListQuery {
            amount: Some("100".into()),
            ..Default::default()
        };
        assert_eq!(
            filters_sql(&query),
            " WHERE s.deleted_at IS NULL AND s.amount = $1"
        );

        let query = StockListQuery {
            amount: Some("plenty".into()),
            ..Default::default()
        };
        assert_eq!(filters_sql(&query), " WHERE s.deleted_at IS NULL");
    }

    #[test]
    fn virtual_sort_key_orders_by_product_name() {
        assert_eq!(sort_column(Some("product_name")), "p.name");
        assert_eq!(sort_column(Some("productId")), "s.product_id");
        assert_eq!(sort_column(Some("product.name")), "s.id");
        assert_eq!(sort_column(None), "s.id");
    }
}
