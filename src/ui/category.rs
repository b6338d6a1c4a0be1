use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::Html;

use crate::database::Database;
use crate::errors::ApiError;
use crate::models::category::Category;
use crate::routes::category::{fetch_categories, CategoryListQuery};
use crate::ui::datatable::{Column, DataTable};
use crate::ui::filter::{FilterField, FilterPanel};
use crate::ui::state::ListState;
use crate::ui::layout;

const BASE_PATH: &str = "/categories";

fn filter_fields() -> Vec<FilterField> {
    vec![
        FilterField::date_range("Created", "createdAt"),
        FilterField::text("Code", "code"),
        FilterField::number("ID", "id"),
        FilterField::text("Name", "name"),
        FilterField::text("Description", "description"),
    ]
}

fn columns() -> Vec<Column<Category>> {
    vec![
        Column::new("Category Code", Some("code"), |c: &Category| c.code.clone()),
        Column::new("Category Name", Some("name"), |c: &Category| c.name.clone()),
        Column::new("Description", Some("description"), |c: &Category| {
            c.description.clone().unwrap_or_else(|| "-".into())
        }),
    ]
}

// GET /categories
pub async fn category_page(
    State(db): State<Database>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let fields = filter_fields();
    let state = ListState::from_params(&params, &fields);

    // the derived parameters feed the same list operation the API exposes
    let query: CategoryListQuery =
        serde_urlencoded::from_str(&state.to_query_string()).unwrap_or_default();
    let paged = fetch_categories(&db, &query)
        .await
        .map_err(|err| ApiError::fetch("categories", err))?;

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
    Ok(Html(layout("Categories", BASE_PATH, &body)))
}
