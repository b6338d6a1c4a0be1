use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::models::listing::{parse_timestamp, positive_or, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::ui::filter::{default_values, FieldKind, FilterField};

/// Select sentinel meaning "no filter"; the query builder never sees it.
pub const SELECT_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Select(String),
    DateRange(Option<NaiveDate>, Option<NaiveDate>),
}

/// List view state, held in the page URL: at most one active sort column,
/// zero-based page index, page size and the current filter values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub sort_by: Option<String>,
    pub sort_desc: bool,
    pub page_index: i64,
    pub page_size: i64,
    pub filters: BTreeMap<String, FilterValue>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            sort_by: None,
            sort_desc: false,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            filters: BTreeMap::new(),
        }
    }
}

impl ListState {
    /// Rebuild the state from the page's query string, guided by the view's
    /// filter field schema. Unknown parameters are ignored.
    pub fn from_params(params: &BTreeMap<String, String>, fields: &[FilterField]) -> Self {
        let page = positive_or(params.get("page").map(String::as_str), DEFAULT_PAGE);
        let page_size = positive_or(params.get("pageSize").map(String::as_str), DEFAULT_PAGE_SIZE);
        let sort_by = params
            .get("sortBy")
            .filter(|value| !value.is_empty())
            .cloned();
        let sort_desc = params
            .get("sortOrder")
            .is_some_and(|value| value.eq_ignore_ascii_case("desc"));

        let mut filters = default_values(fields);
        for field in fields {
            match &field.kind {
                FieldKind::DateRange => {
                    let from = param_date(params, &format!("{}From", field.name));
                    let to = param_date(params, &format!("{}To", field.name));
                    filters.insert(field.name.to_string(), FilterValue::DateRange(from, to));
                }
                FieldKind::Select(_) => {
                    if let Some(value) = params.get(field.name).filter(|v| !v.is_empty()) {
                        filters.insert(field.name.to_string(), FilterValue::Select(value.clone()));
                    }
                }
                _ => {
                    if let Some(value) = params.get(field.name).filter(|v| !v.is_empty()) {
                        filters.insert(field.name.to_string(), FilterValue::Text(value.clone()));
                    }
                }
            }
        }

        Self {
            sort_by,
            sort_desc,
            page_index: page - 1,
            page_size,
            filters,
        }
    }

    /// Pure derivation from state to outbound request parameters: one-based
    /// page, normalized timestamps for set date bounds, empty fields omitted
    /// and the select "all" sentinel dropped entirely.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), (self.page_index + 1).to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy".to_string(), sort_by.clone()));
            params.push((
                "sortOrder".to_string(),
                if self.sort_desc { "desc" } else { "asc" }.to_string(),
            ));
        }
        for (name, value) in &self.filters {
            match value {
                FilterValue::Text(v) if !v.is_empty() => {
                    params.push((name.clone(), v.clone()));
                }
                FilterValue::Select(v) if !v.is_empty() && v != SELECT_ALL => {
                    params.push((name.clone(), v.clone()));
                }
                FilterValue::DateRange(from, to) => {
                    if let Some(from) = from {
                        params.push((format!("{name}From"), normalize_date(*from)));
                    }
                    if let Some(to) = to {
                        params.push((format!("{name}To"), normalize_date(*to)));
                    }
                }
                _ => {}
            }
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self.to_params()).unwrap_or_default()
    }

    pub fn href(&self, base_path: &str) -> String {
        format!("{}?{}", base_path, self.to_query_string())
    }

    pub fn with_page(&self, page_index: i64) -> Self {
        Self {
            page_index,
            ..self.clone()
        }
    }

    /// First click sorts ascending; clicking the active column flips the
    /// direction. The page is kept, matching filter-free sort changes.
    pub fn toggle_sort(&self, key: &str) -> Self {
        let mut next = self.clone();
        if next.sort_by.as_deref() == Some(key) {
            next.sort_desc = !next.sort_desc;
        } else {
            next.sort_by = Some(key.to_string());
            next.sort_desc = false;
        }
        next
    }
}

fn param_date(params: &BTreeMap<String, String>, key: &str) -> Option<NaiveDate> {
    parse_timestamp(params.get(key).map(String::as_str)).map(|dt| dt.date_naive())
}

fn normalize_date(date: NaiveDate) -> String {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&midnight).to_rfc3339()
}
