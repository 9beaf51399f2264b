// What one screen of the catalog looks like: the rows of the current
// page plus the navigation state, and two renderers for it.

use std::fmt::Write as _;

use crate::catalog::{escape_for_display, CatalogEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<CatalogEntry>,
    /// Zero-based.
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    /// Position of the first row within the filtered list.
    pub offset: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageView {
    /// "Page X of Y". Y is never shown as 0, an empty list is one empty page.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page + 1, self.total_pages.max(1))
    }
}

/// Plain-text table for the terminal.
pub fn render_text(view: &PageView) -> String {
    let mut out = String::new();
    if view.rows.is_empty() {
        out.push_str("Nothing found\n");
    } else {
        let code_width = view
            .rows
            .iter()
            .map(|r| r.code.chars().count())
            .max()
            .unwrap_or(0)
            .max("Code".len());
        let _ = writeln!(out, "{:>3}  {:<code_width$}  Name", "#", "Code");
        for (i, row) in view.rows.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}  {:<code_width$}  {}",
                view.offset + i + 1,
                row.code,
                row.name
            );
        }
    }
    let _ = writeln!(
        out,
        "{} ({} matching)",
        view.page_label(),
        view.filtered_count
    );
    out
}

/// HTML table fragment for embedding in a page. User-supplied text is
/// escaped.
pub fn render_html(view: &PageView) -> String {
    let mut out = String::from("<table class=\"nomenclature\">\n");
    out.push_str("  <thead><tr><th>#</th><th>Code</th><th>Name</th></tr></thead>\n");
    out.push_str("  <tbody>\n");
    if view.rows.is_empty() {
        out.push_str("    <tr><td colspan=\"3\">Nothing found</td></tr>\n");
    }
    for (i, row) in view.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "    <tr><td>{}</td><td><code>{}</code></td><td>{}</td></tr>",
            view.offset + i + 1,
            escape_for_display(&row.code),
            escape_for_display(&row.name)
        );
    }
    out.push_str("  </tbody>\n");
    let _ = writeln!(
        out,
        "  <caption>{}</caption>",
        escape_for_display(&view.page_label())
    );
    out.push_str("</table>\n");
    out
}
