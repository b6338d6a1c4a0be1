use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::Html;

use crate::database::Database;
use crate::errors::ApiError;
use crate::models::stock::StockWithRelations;
use crate::routes::stock::{fetch_stocks, StockListQuery};
use crate::ui::datatable::{Column, DataTable};
use crate::ui::filter::{FilterField, FilterPanel};
use crate::ui::state::ListState;
use crate::ui::layout;

const BASE_PATH: &str = "/stocks";

fn filter_fields() -> Vec<FilterField> {
    vec![
        FilterField::date_range("Created", "createdAt"),
        FilterField::number("ID", "id"),
        FilterField::text("Product", "product"),
        FilterField::text("Unit", "unit"),
    ]
}

fn columns() -> Vec<Column<StockWithRelations>> {
    vec![
        // virtual sort key: orders by the related product's name
        Column::new("Product Name", Some("product_name"), |s: &StockWithRelations| {
            s.product
                .as_ref()
                .map(|p| p.product.name.clone())
                .unwrap_or_else(|| "-".into())
        }),
        Column::new("Product Category", None, |s: &StockWithRelations| {
            s.product
                .as_ref()
                .and_then(|p| p.category.as_ref())
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "-".into())
        }),
        Column::new("Stock", Some("amount"), |s: &StockWithRelations| {
            s.stock.amount.to_string()
        }),
        Column::new("Unit", Some("unit"), |s: &StockWithRelations| {
            s.stock.unit.clone()
        }),
    ]
}

// GET /stocks
pub async fn stock_page(
    State(db): State<Database>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let fields = filter_fields();
    let state = ListState::from_params(&params, &fields);

    let query: StockListQuery =
        serde_urlencoded::from_str(&state.to_query_string()).unwrap_or_default();
    let paged = fetch_stocks(&db, &query)
        .await
        .map_err(|err| ApiError::fetch("stocks", err))?;

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
        show_toggle: false,
    };

    let mut body = panel.render(&state);
    body.push_str(&table.render());
    Ok(Html(layout("Stock", BASE_PATH, &body)))
}
