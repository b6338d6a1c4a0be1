use crate::ui::escape_html;
use crate::ui::state::ListState;

/// One table column: header label, cell accessor and an optional sort key.
/// Columns without a sort key render plain headers.
pub struct Column<T> {
    pub header: &'static str,
    pub sort_key: Option<&'static str>,
    accessor: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> Column<T> {
    pub fn new(
        header: &'static str,
        sort_key: Option<&'static str>,
        accessor: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            header,
            sort_key,
            accessor: Box::new(accessor),
        }
    }
}

/// Externally-paginated, externally-sorted table. Holds no data-fetching
/// logic; sorting and paging interactions are links derived from the current
/// list state.
pub struct DataTable<'a, T> {
    pub columns: &'a [Column<T>],
    pub data: &'a [T],
    pub state: &'a ListState,
    pub total: i64,
    pub total_pages: i64,
    pub base_path: &'a str,
    pub show_toggle: bool,
}

impl<T> DataTable<'_, T> {
    pub fn render(&self) -> String {
        let mut html = String::from("<table class=\"datatable\">\n<thead><tr>");
        if self.show_toggle {
            html.push_str("<th class=\"toggle-head\"></th>");
        }
        for column in self.columns {
            html.push_str(&self.render_header_cell(column));
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        if self.data.is_empty() {
            let span = self.columns.len() + usize::from(self.show_toggle);
            html.push_str(&format!(
                "<tr><td class=\"empty\" colspan=\"{span}\">No results.</td></tr>\n"
            ));
        } else {
            for record in self.data {
                html.push_str("<tr>");
                if self.show_toggle {
                    // presentation-only wrap toggle, one row at a time
                    html.push_str(
                        "<td class=\"toggle-cell\"><button type=\"button\" class=\"row-toggle\" \
                         onclick=\"var r=this.closest('tr');r.classList.toggle('expanded');\
                         this.textContent=r.classList.contains('expanded')?'\u{2212}':'+';\">+\
                         </button></td>",
                    );
                }
                for column in self.columns {
                    html.push_str(&format!(
                        "<td>{}</td>",
                        escape_html(&(column.accessor)(record))
                    ));
                }
                html.push_str("</tr>\n");
            }
        }
        html.push_str("</tbody>\n</table>\n");
        html.push_str(&self.render_footer());
        html
    }

    fn render_header_cell(&self, column: &Column<T>) -> String {
        match column.sort_key {
            Some(key) => {
                let active = self.state.sort_by.as_deref() == Some(key);
                let asc_class = if active && !self.state.sort_desc { "glyph on" } else { "glyph" };
                let desc_class = if active && self.state.sort_desc { "glyph on" } else { "glyph" };
                format!(
                    "<th><a class=\"sort\" href=\"{}\">{} \
                     <span class=\"{asc_class}\">\u{25b2}</span>\
                     <span class=\"{desc_class}\">\u{25bc}</span></a></th>",
                    escape_html(&self.state.toggle_sort(key).href(self.base_path)),
                    escape_html(column.header)
                )
            }
            None => format!("<th>{}</th>", escape_html(column.header)),
        }
    }

    fn render_footer(&self) -> String {
        // a page past the end shows an empty 0-0 range, not a bogus one
        let raw_start = self
            .state
            .page_index
            .saturating_mul(self.state.page_size)
            .saturating_add(1);
        let (start, end) = if self.total == 0 || raw_start > self.total {
            (0, 0)
        } else {
            (
                raw_start,
                self.state
                    .page_index
                    .saturating_add(1)
                    .saturating_mul(self.state.page_size)
                    .min(self.total),
            )
        };
        let mut html = format!(
            "<div class=\"table-footer\"><span>Showing {start}-{end} of {} </span><nav class=\"pager\">",
            self.total
        );

        html.push_str(&self.pager_link("\u{2039}", self.state.page_index - 1, self.state.page_index == 0));
        for page in 0..self.total_pages {
            if page == self.state.page_index {
                html.push_str(&format!("<span class=\"page active\">{}</span>", page + 1));
            } else {
                html.push_str(&format!(
                    "<a class=\"page\" href=\"{}\">{}</a>",
                    escape_html(&self.state.with_page(page).href(self.base_path)),
                    page + 1
                ));
            }
        }
        let next_disabled =
            self.total_pages == 0 || self.state.page_index >= self.total_pages - 1;
        html.push_str(&self.pager_link("\u{203a}", self.state.page_index + 1, next_disabled));

        html.push_str("</nav></div>\n");
        html
    }

    fn pager_link(&self, glyph: &str, page_index: i64, disabled: bool) -> String {
        if disabled {
            format!("<span class=\"page disabled\">{glyph}</span>")
        } else {
            format!(
                "<a class=\"page\" href=\"{}\">{glyph}</a>",
                escape_html(&self.state.with_page(page_index).href(self.base_path))
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column<(&'static str, i64)>> {
        vec![
            Column::new("Name", Some("name"), |row: &(&str, i64)| row.0.to_string()),
            Column::new("Amount", None, |row: &(&str, i64)| row.1.to_string()),
        ]
    }

    fn table<'a>(
        columns: &'a [Column<(&'static str, i64)>],
        data: &'a [(&'static str, i64)],
        state: &'a ListState,
        total: i64,
        total_pages: i64,
    ) -> DataTable<'a, (&'static str, i64)> {
        DataTable {
            columns,
            data,
            state,
            total,
            total_pages,
            base_path: "/products",
            show_toggle: false,
        }
    }

    #[test]
    fn empty_data_renders_single_full_width_row() {
        let columns = columns();
        let state = ListState::default();
        let html = table(&columns, &[], &state, 0, 0).render();
        assert!(html.contains("colspan=\"2\">No results.</td>"));
        assert_eq!(html.matches("<tr>").count(), 2); // header + empty row
    }

    #[test]
    fn toggle_column_widens_the_empty_row() {
        let columns = columns();
        let state = ListState::default();
        let mut t = table(&columns, &[], &state, 0, 0);
        t.show_toggle = true;
        assert!(t.render().contains("colspan=\"3\""));
    }

    #[test]
    fn sortable_header_links_and_marks_active_direction() {
        let columns = columns();
        let state = ListState::default().toggle_sort("name"); // asc
        let html = table(&columns, &[("Apple", 1)], &state, 1, 1).render();
        assert!(html.contains("sortBy=name"));
        assert!(html.contains("sortOrder=desc")); // link toggles to desc
        assert!(html.contains("<span class=\"glyph on\">\u{25b2}</span>"));
        assert!(html.contains("<span class=\"glyph\">\u{25bc}</span>"));
        // unsortable column renders a plain header
        assert!(html.contains("<th>Amount</th>"));
    }

    #[test]
    fn footer_shows_visible_range() {
        let columns = columns();
        let state = ListState {
            page_index: 1,
            ..Default::default()
        };
        let data = [("Apple", 1)];
        let html = table(&columns, &data, &state, 23, 3).render();
        assert!(html.contains("Showing 11-20 of 23"));
    }

    #[test]
    fn footer_clamps_last_page_range() {
        let columns = columns();
        let state = ListState {
            page_index: 2,
            ..Default::default()
        };
        let data = [("Apple", 1)];
        let html = table(&columns, &data, &state, 23, 3).render();
        assert!(html.contains("Showing 21-23 of 23"));
    }

    #[test]
    fn footer_shows_empty_range_past_the_last_page() {
        let columns = columns();
        let state = ListState {
            page_index: 4,
            ..Default::default()
        };
        let html = table(&columns, &[], &state, 3, 1).render();
        assert!(html.contains("Showing 0-0 of 3"));
    }

    #[test]
    fn footer_survives_extreme_page_indexes() {
        let columns = columns();
        let state = ListState {
            page_index: i64::MAX - 1,
            ..Default::default()
        };
        let html = table(&columns, &[], &state, 3, 1).render();
        assert!(html.contains("Showing 0-0 of 3"));
    }

    #[test]
    fn pager_disables_edges_and_highlights_active_page() {
        let columns = columns();
        let state = ListState::default();
        let data = [("Apple", 1)];
        let html = table(&columns, &data, &state, 23, 3).render();
        assert!(html.contains("<span class=\"page disabled\">\u{2039}</span>"));
        assert!(html.contains("<span class=\"page active\">1</span>"));
        assert!(html.contains(">\u{203a}</a>"));
        assert_eq!(html.matches("class=\"page\"").count(), 3); // pages 2, 3, next
    }

    #[test]
    fn pager_disables_next_when_there_are_no_pages() {
        let columns = columns();
        let state = ListState::default();
        let html = table(&columns, &[], &state, 0, 0).render();
        assert!(html.contains("<span class=\"page disabled\">\u{2039}</span>"));
        assert!(html.contains("<span class=\"page disabled\">\u{203a}</span>"));
        assert!(html.contains("Showing 0-0 of 0"));
    }

    #[test]
    fn cell_values_are_escaped() {
        let columns = vec![Column::new("Name", None, |row: &(&str, i64)| {
            row.0.to_string()
        })];
        let state = ListState::default();
        let data = [("<b>bold</b>", 0)];
        let html = DataTable {
            columns: &columns,
            data: &data,
            state: &state,
            total: 1,
            total_pages: 1,
            base_path: "/x",
            show_toggle: false,
        }
        .render();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }
}
