use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

use crate::database::Database;
use crate::errors::ApiError;
use crate::models::category::Category;
use crate::models::listing::{
    contains_pattern, non_empty, offset, parse_i32, parse_timestamp, positive_or, Paged,
    Pagination, SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

/// All parameters arrive as raw strings; invalid values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at_from: Option<String>,
    pub created_at_to: Option<String>,
}

// GET /api/category
pub async fn list_categories(
    State(db): State<Database>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<Paged<Category>>, ApiError> {
    let paged = fetch_categories(&db, &query)
        .await
        .map_err(|err| ApiError::fetch("categories", err))?;
    Ok(Json(paged))
}

pub async fn fetch_categories(
    db: &Database,
    query: &CategoryListQuery,
) -> Result<Paged<Category>, sqlx::Error> {
    let page = positive_or(query.page.as_deref(), DEFAULT_PAGE);
    let page_size = positive_or(query.page_size.as_deref(), DEFAULT_PAGE_SIZE);
    let order = SortOrder::parse(query.sort_order.as_deref());

    let mut select = QueryBuilder::<Postgres>::new(
        "SELECT id, code, name, description, created_at, updated_at, deleted_at FROM categories",
    );
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

    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM categories");
    push_filters(&mut count, query);

    let rows = select.build_query_as::<Category>().fetch_all(db);
    let total = count.build_query_scalar::<i64>().fetch_one(db);
    let (rows, total) = tokio::try_join!(rows, total)?;

    Ok(Paged {
        data: rows,
        pagination: Pagination::new(page, page_size, total),
    })
}

/// Sort keys are validated against this allow-list before touching SQL;
/// anything else degrades to the id column.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by {
        Some("code") => "code",
        Some("name") => "name",
        Some("description") => "description",
        Some("createdAt") => "created_at",
        Some("updatedAt") => "updated_at",
        Some("deletedAt") => "deleted_at",
        _ => "id",
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, query: &CategoryListQuery) {
    qb.push(" WHERE deleted_at IS NULL");
    if let Some(id) = parse_i32(query.id.as_deref()) {
        qb.push(" AND id = ");
        qb.push_bind(id);
    }
    if let Some(code) = non_empty(query.code.as_deref()) {
        qb.push(" AND code LIKE ");
        qb.push_bind(contains_pattern(code));
    }
    if let Some(name) = non_empty(query.name.as_deref()) {
        qb.push(" AND name LIKE ");
        qb.push_bind(contains_pattern(name));
    }
    if let Some(description) = non_empty(query.description.as_deref()) {
        qb.push(" AND description LIKE ");
        qb.push_bind(contains_pattern(description));
    }
    if let Some(from) = parse_timestamp(query.created_at_from.as_deref()) {
        qb.push(" AND created_at >= ");
        qb.push_bind(from);
    }
    if let Some(to) = parse_timestamp(query.created_at_to.as_deref()) {
        qb.push(" AND created_at <= ");
        qb.push_bind(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters_sql(query: &CategoryListQuery) -> String {
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_filters(&mut qb, query);
        qb.sql().to_string()
    }

    #[test]
    fn base_predicate_excludes_soft_deleted_rows() {
        assert_eq!(
            filters_sql(&CategoryListQuery::default()),
            " WHERE deleted_at IS NULL"
        );
    }

    #[test]
    fn filters_conjoin_in_order() {
        let query = CategoryListQuery {
            name: Some("Food".into()),
            created_at_from: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert_eq!(
            filters_sql(&query),
            " WHERE deleted_at IS NULL AND name LIKE $1 AND created_at >= $2"
        );
    }

    #[test]
    fn unparseable_values_add_no_predicate() {
        let query = CategoryListQuery {
            id: Some("not-a-number".into()),
            code: Some(String::new()),
            created_at_to: Some("eventually".into()),
            ..Default::default()
        };
        assert_eq!(filters_sql(&query), " WHERE deleted_at IS NULL");
    }

    #[test]
    fn sort_key_outside_allow_list_falls_back_to_id() {
        assert_eq!(sort_column(Some("createdAt")), "created_at");
        assert_eq!(sort_column(Some("deleted_at; DROP TABLE categories")), "id");
        assert_eq!(sort_column(None), "id");
    }

    #[test]
    fn query_deserializes_from_query_string() {
        let query: CategoryListQuery =
            serde_urlencoded::from_str("page=2&pageSize=5&sortBy=name&sortOrder=DESC&name=Food")
                .unwrap();
        assert_eq!(query.page.as_deref(), Some("2"));
        assert_eq!(query.page_size.as_deref(), Some("5"));
        assert_eq!(query.sort_by.as_deref(), Some("name"));
        assert_eq!(query.name.as_deref(), Some("Food"));
    }
}
