use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::host::RenderSurface;
use crate::ui::export_trigger::ExportTrigger;

/// Surface that draws the table with comfy-table for terminal output
#[derive(Debug, Default)]
pub struct TerminalTableSurface {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    export_control: Option<ExportTrigger>,
}

impl TerminalTableSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Build the printable table; None when nothing is rendered
    pub fn render(&self) -> Option<Table> {
        let headers = self.headers.as_ref()?;

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<Cell>>(),
        );
        for row in &self.rows {
            table.add_row(row.clone());
        }

        Some(table)
    }
}

impl RenderSurface for TerminalTableSurface {
    fn clear(&mut self) {
        self.headers = None;
        self.rows.clear();
        self.export_control = None;
    }

    fn append_header_row(&mut self, headers: &[String]) {
        self.headers = Some(headers.to_vec());
    }

    fn append_body_row(&mut self, cells: &[String]) {
        self.rows.push(cells.to_vec());
    }

    fn attach_export_control(&mut self, trigger: ExportTrigger) {
        self.export_control = Some(trigger);
    }

    fn export_control(&self) -> Option<&ExportTrigger> {
        self.export_control.as_ref()
    }

    fn is_empty(&self) -> bool {
        self.headers.is_none() && self.rows.is_empty() && self.export_control.is_none()
    }
}
