use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::Html;

use crate::database::Database;
use crate::errors::ApiError;
use crate::models::product::ProductWithRelations;
use crate::routes::product::{fetch_products, ProductListQuery};
use crate::ui::datatable::{Column, DataTable};
use crate::ui::filter::{FilterField, FilterPanel};
use crate::ui::state::ListState;
use crate::ui::{format_date, layout};

const BASE_PATH: &str = "/products";

fn filter_fields() -> Vec<FilterField> {
    vec![
        FilterField::date_range("Created", "createdAt"),
        FilterField::number("ID", "id"),
        FilterField::text("Product Code", "code"),
        FilterField::text("Product Name", "name"),
        FilterField::text("Category", "category"),
        FilterField::text("Unit", "unit"),
        FilterField::select(
            "In Stock",
            "inStock",
            &[("All", "all"), ("Yes", "true"), ("No", "false")],
        ),
    ]
}

fn columns() -> Vec<Column<ProductWithRelations>> {
    vec![
        Column::new("Product Code", Some("code"), |p: &ProductWithRelations| {
            p.product.code.clone()
        }),
        Column::new("Product Name", Some("name"), |p: &ProductWithRelations| {
            p.product.name.clone()
        }),
        Column::new("Created", Some("createdAt"), |p: &ProductWithRelations| {
            format_date(&p.product.created_at)
        }),
        // related field, not sortable on the endpoint
        Column::new("Category", None, |p: &ProductWithRelations| {
            p.category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "-".into())
        }),
        Column::new("Unit", Some("unit"), |p: &ProductWithRelations| {
            p.product.unit.clone()
        }),
        Column::new("In Stock", Some("inStock"), |p: &ProductWithRelations| {
            if p.product.in_stock { "Yes" } else { "No" }.to_string()
        }),
        Column::new("Description", None, |p: &ProductWithRelations| {
            p.product.description.clone().unwrap_or_else(|| "-".into())
        }),
    ]
}

// GET /products
pub async fn product_page(
    State(db): State<Database>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let fields = filter_fields();
    let state = ListState::from_params(&params, &fields);

    let query: ProductListQuery =
        serde_urlencoded::from_str(&state.to_query_string()).unwrap_or_default();
    let paged = fetch_products(&db, &query)
        .await
        .map_err(|err| ApiError::fetch("products", err))?;

    let columns = columns();
    let panel = FilterPanel {
        fields: &fields,
        action: BASE_PATH,
        open: false,
    };
    let table = DataTable {
        columns: &columns,
        data: &paged.data,
        state: &state,
        total: paged.pagination.total,
        total_pages: paged.pagination.total_pages,
        base_path: BASE_PATH,
        // long descriptions get the per-row wrap toggle
        show_toggle: true,
    };

    let mut body = panel.render(&state);
    body.push_str(&table.render());
    Ok(Html(layout("Products", BASE_PATH, &body)))
}
