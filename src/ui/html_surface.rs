//! HTML table surface
//!
//! Holds the rendered rows the way a DOM container would and serializes
//! them as an HTML fragment: the download control followed by the table.

use std::borrow::Cow;

use crate::host::RenderSurface;
use crate::ui::export_trigger::ExportTrigger;

/// Element id of the download control
pub const EXPORT_CONTROL_ID: &str = "bDownload";

#[derive(Debug, Default)]
pub struct HtmlTableSurface {
    header_rows: Vec<Vec<String>>,
    body_rows: Vec<Vec<String>>,
    export_control: Option<ExportTrigger>,
}

impl HtmlTableSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header_rows(&self) -> &[Vec<String>] {
        &self.header_rows
    }

    pub fn body_rows(&self) -> &[Vec<String>] {
        &self.body_rows
    }

    /// Render the container as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<div>");
        if let Some(trigger) = &self.export_control {
            html.push_str(&format!(
                "<input id=\"{}\" type=\"submit\" value=\"{}\">",
                EXPORT_CONTROL_ID,
                html_escape(&trigger.label())
            ));
        }
        html.push_str("</div>\n<table>\n");

        for row in &self.header_rows {
            Self::push_row(&mut html, row, "th");
        }
        for row in &self.body_rows {
            Self::push_row(&mut html, row, "td");
        }

        html.push_str("</table>\n");
        html
    }

    fn push_row(html: &mut String, cells: &[String], tag: &str) {
        html.push_str("<tr>");
        for cell in cells {
            html.push_str(&format!("<{tag}>{}</{tag}>", html_escape(cell)));
        }
        html.push_str("</tr>\n");
    }
}

impl RenderSurface for HtmlTableSurface {
    fn clear(&mut self) {
        self.header_rows.clear();
        self.body_rows.clear();
        self.export_control = None;
    }

    fn append_header_row(&mut self, headers: &[String]) {
        self.header_rows.push(headers.to_vec());
    }

    fn append_body_row(&mut self, cells: &[String]) {
        self.body_rows.push(cells.to_vec());
    }

    fn attach_export_control(&mut self, trigger: ExportTrigger) {
        self.export_control = Some(trigger);
    }

    fn export_control(&self) -> Option<&ExportTrigger> {
        self.export_control.as_ref()
    }

    fn is_empty(&self) -> bool {
        self.header_rows.is_empty() && self.body_rows.is_empty() && self.export_control.is_none()
    }
}

/// Escapes HTML special characters in a string.
///
/// Returns a borrowed reference if no escaping is needed.
fn html_escape(s: &str) -> Cow<'_, str> {
    if s.contains(['&', '<', '>', '"', '\'']) {
        let mut escaped = String::with_capacity(s.len() + 8);
        for c in s.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                _ => escaped.push(c),
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(s)
    }
}
