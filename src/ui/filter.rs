use std::collections::BTreeMap;

use crate::ui::escape_html;
use crate::ui::state::{FilterValue, ListState};

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    DateRange,
    Select(Vec<SelectOption>),
}

/// One caller-declared filter form field.
#[derive(Debug, Clone)]
pub struct FilterField {
    pub label: &'static str,
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    pub fn text(label: &'static str, name: &'static str) -> Self {
        Self { label, name, kind: FieldKind::Text }
    }

    pub fn number(label: &'static str, name: &'static str) -> Self {
        Self { label, name, kind: FieldKind::Number }
    }

    pub fn email(label: &'static str, name: &'static str) -> Self {
        Self { label, name, kind: FieldKind::Email }
    }

    pub fn date_range(label: &'static str, name: &'static str) -> Self {
        Self { label, name, kind: FieldKind::DateRange }
    }

    pub fn select(
        label: &'static str,
        name: &'static str,
        options: &[(&'static str, &'static str)],
    ) -> Self {
        Self {
            label,
            name,
            kind: FieldKind::Select(
                options
                    .iter()
                    .map(|(label, value)| SelectOption { label, value })
                    .collect(),
            ),
        }
    }
}

/// Type-appropriate defaults: empty string for text-like fields and select,
/// an unset pair for date ranges.
pub fn default_values(fields: &[FilterField]) -> BTreeMap<String, FilterValue> {
    fields
        .iter()
        .map(|field| {
            let value = match field.kind {
                FieldKind::DateRange => FilterValue::DateRange(None, None),
                FieldKind::Select(_) => FilterValue::Select(String::new()),
                _ => FilterValue::Text(String::new()),
            };
            (field.name.to_string(), value)
        })
        .collect()
}

/// Collapsible filter form. Apply submits the current field values as a GET
/// back to `action` (page resets to 1); Reset links to the bare page, which
/// is equivalent to applying no filters.
pub struct FilterPanel<'a> {
    pub fields: &'a [FilterField],
    pub action: &'a str,
    pub open: bool,
}

impl FilterPanel<'_> {
    pub fn render(&self, state: &ListState) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<details class=\"filter-panel\"{}>\n<summary>Filter</summary>\n",
            if self.open { " open" } else { "" }
        ));
        html.push_str(&format!(
            "<form method=\"get\" action=\"{}\">\n",
            escape_html(self.action)
        ));

        // sort and page size survive an apply; the page number does not
        if let Some(sort_by) = &state.sort_by {
            html.push_str(&hidden("sortBy", sort_by));
            html.push_str(&hidden("sortOrder", if state.sort_desc { "desc" } else { "asc" }));
        }
        html.push_str(&hidden("pageSize", &state.page_size.to_string()));

        let mid = (self.fields.len() + 1) / 2;
        let (left, right) = self.fields.split_at(mid.min(self.fields.len()));
        html.push_str("<div class=\"filter-grid\">\n");
        for column in [left, right] {
            html.push_str("<div class=\"filter-column\">\n");
            for field in column {
                html.push_str(&render_field(field, state));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");

        html.push_str(&format!(
            "<div class=\"filter-actions\">\
             <a class=\"reset\" href=\"{}\">Reset</a>\
             <button type=\"submit\">Apply</button></div>\n",
            escape_html(self.action)
        ));
        html.push_str("</form>\n</details>\n");
        html
    }
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape_html(name),
        escape_html(value)
    )
}

fn render_field(field: &FilterField, state: &ListState) -> String {
    let current = state.filters.get(field.name);
    let label = escape_html(field.label);
    match &field.kind {
        FieldKind::DateRange => {
            let (from, to) = match current {
                Some(FilterValue::DateRange(from, to)) => (*from, *to),
                _ => (None, None),
            };
            let fmt = |date: Option<chrono::NaiveDate>| {
                date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
            };
            format!(
                "<label class=\"filter-field\"><span>{label}</span>\
                 <input type=\"date\" name=\"{name}From\" value=\"{from}\"> \
                 <span class=\"range-sep\">to</span> \
                 <input type=\"date\" name=\"{name}To\" value=\"{to}\"></label>\n",
                name = field.name,
                from = fmt(from),
                to = fmt(to),
            )
        }
        FieldKind::Select(options) => {
            let selected = match current {
                Some(FilterValue::Select(value)) => value.as_str(),
                _ => "",
            };
            let mut html = format!(
                "<label class=\"filter-field\"><span>{label}</span>\
                 <select name=\"{}\">\n",
                field.name
            );
            for option in options {
                html.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>\n",
                    escape_html(option.value),
                    if option.value == selected { " selected" } else { "" },
                    escape_html(option.label)
                ));
            }
            html.push_str("</select></label>\n");
            html
        }
        kind => {
            let input_type = match kind {
                FieldKind::Number => "number",
                FieldKind::Email => "email",
                _ => "text",
            };
            let value = match current {
                Some(FilterValue::Text(value)) => value.as_str(),
                _ => "",
            };
            format!(
                "<label class=\"filter-field\"><span>{label}</span>\
                 <input type=\"{input_type}\" name=\"{}\" value=\"{}\"></label>\n",
                field.name,
                escape_html(value)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<FilterField> {
        vec![
            FilterField::date_range("Created", "createdAt"),
            FilterField::number("ID", "id"),
            FilterField::text("Name", "name"),
            FilterField::select("In Stock", "inStock", &[("All", "all"), ("Yes", "true")]),
        ]
    }

    #[test]
    fn defaults_match_field_types() {
        let defaults = default_values(&fields());
        assert_eq!(defaults["createdAt"], FilterValue::DateRange(None, None));
        assert_eq!(defaults["id"], FilterValue::Text(String::new()));
        assert_eq!(defaults["inStock"], FilterValue::Select(String::new()));
    }

    #[test]
    fn fields_split_into_two_columns_left_heavy() {
        let fields = fields();
        let panel = FilterPanel { fields: &fields, action: "/products", open: true };
        let html = panel.render(&ListState::default());
        assert_eq!(html.matches("filter-column").count(), 2);
        // 4 fields: 2 left, 2 right
        let first_column = html.split("filter-column").nth(1).unwrap();
        assert!(first_column.contains("createdAtFrom"));
        assert!(first_column.contains("name=\"id\""));
    }

    #[test]
    fn number_and_email_fields_render_typed_inputs() {
        let fields = vec![
            FilterField::number("Amount", "amount"),
            FilterField::email("Supplier Email", "supplierEmail"),
        ];
        let mut state = ListState::default();
        state
            .filters
            .insert("amount".into(), FilterValue::Text("42".into()));
        let panel = FilterPanel { fields: &fields, action: "/stocks", open: true };
        let html = panel.render(&state);
        assert!(html.contains("<input type=\"number\" name=\"amount\" value=\"42\">"));
        assert!(html.contains("<input type=\"email\" name=\"supplierEmail\" value=\"\">"));
    }

    #[test]
    fn current_values_render_into_inputs() {
        let fields = fields();
        let mut state = ListState::default();
        state
            .filters
            .insert("name".into(), FilterValue::Text("App & Co".into()));
        state
            .filters
            .insert("inStock".into(), FilterValue::Select("true".into()));
        let panel = FilterPanel { fields: &fields, action: "/products", open: true };
        let html = panel.render(&state);
        assert!(html.contains("value=\"App &amp; Co\""));
        assert!(html.contains("<option value=\"true\" selected>"));
    }

    #[test]
    fn reset_links_to_the_bare_page() {
        let fields = fields();
        let panel = FilterPanel { fields: &fields, action: "/products", open: false };
        let html = panel.render(&ListState::default());
        assert!(html.contains("href=\"/products\">Reset</a>"));
        assert!(!html.contains("<details class=\"filter-panel\" open"));
    }

    #[test]
    fn sort_state_survives_an_apply() {
        let fields = fields();
        let state = ListState::default().toggle_sort("name").toggle_sort("name");
        let panel = FilterPanel { fields: &fields, action: "/products", open: true };
        let html = panel.render(&state);
        assert!(html.contains("name=\"sortBy\" value=\"name\""));
        assert!(html.contains("name=\"sortOrder\" value=\"desc\""));
    }
}
