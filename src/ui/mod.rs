pub mod category;
pub mod datatable;
pub mod filter;
pub mod product;
pub mod state;
pub mod stock;

use chrono::{DateTime, Utc};

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Cell format for timestamps, e.g. "01 May 2024".
pub(crate) fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d %b %Y").to_string()
}

const TABS: &[(&str, &str)] = &[
    ("/products", "Products"),
    ("/categories", "Categories"),
    ("/stocks", "Stock"),
];

/// Common page shell: nav tabs plus the view body.
pub(crate) fn layout(title: &str, active_path: &str, body: &str) -> String {
    let mut nav = String::new();
    for (path, label) in TABS {
        let class = if *path == active_path { "tab active" } else { "tab" };
        nav.push_str(&format!("<a class=\"{class}\" href=\"{path}\">{label}</a>"));
    }
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Inventory</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <main>\n<nav class=\"tabs\">{nav}</nav>\n{body}</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem auto;max-width:1200px;padding:0 1rem}\
.tabs{display:flex;gap:.5rem;margin-bottom:1rem}\
.tab{padding:.4rem .8rem;text-decoration:none;color:#333;border-radius:4px}\
.tab.active{background:#3b82f6;color:#fff}\
.datatable{width:100%;border-collapse:collapse;border:1px solid #e5e7eb}\
.datatable th,.datatable td{border-bottom:1px solid #e5e7eb;padding:.5rem;text-align:left}\
.datatable td{white-space:nowrap;overflow:hidden;text-overflow:ellipsis;max-width:200px}\
.datatable tr.expanded td{white-space:normal}\
.datatable a.sort{text-decoration:none;color:inherit}\
.glyph{color:#d1d5db;font-size:.6rem}\
.glyph.on{color:#111}\
.empty{text-align:center;padding:2rem}\
.table-footer{display:flex;justify-content:space-between;align-items:center;margin-top:.5rem}\
.pager .page{margin:0 .15rem;padding:.2rem .55rem;border:1px solid #e5e7eb;border-radius:4px;\
text-decoration:none;color:#111}\
.pager .page.active{background:#3b82f6;color:#fff;border-color:#3b82f6}\
.pager .page.disabled{color:#d1d5db}\
.row-toggle{width:1.5rem;height:1.5rem;border:1px solid #3b82f6;color:#3b82f6;\
background:#fff;border-radius:4px;cursor:pointer}\
.filter-panel{margin-bottom:1rem;border:1px solid #e5e7eb;border-radius:8px;padding:.75rem}\
.filter-panel summary{cursor:pointer;font-weight:600}\
.filter-grid{display:grid;grid-template-columns:1fr 1fr;gap:2rem;margin-top:.75rem}\
.filter-column{display:flex;flex-direction:column;gap:.5rem}\
.filter-field{display:flex;align-items:center;gap:.5rem}\
.filter-field span{width:8rem}\
.filter-field input,.filter-field select{flex:1;padding:.3rem}\
.filter-actions{display:flex;justify-content:flex-end;gap:.5rem;margin-top:1rem}\
.filter-actions .reset{color:#ef4444;align-self:center;text-decoration:none}\
.filter-actions button{background:#3b82f6;color:#fff;border:0;border-radius:4px;\
padding:.4rem 1rem;cursor:pointer}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(escape_html("a<b> & \"c\""), "a&lt;b&gt; &amp; &quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn layout_highlights_the_active_tab() {
        let html = layout("Products", "/products", "<p>x</p>");
        assert!(html.contains("<a class=\"tab active\" href=\"/products\">Products</a>"));
        assert!(html.contains("<a class=\"tab\" href=\"/categories\">Categories</a>"));
    }
}
