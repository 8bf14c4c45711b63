//! Data view validation
//!
//! Checks a host data view for the minimum shape needed to render and turns
//! it into an owned `DataTable`. Rejection is an expected outcome, not a
//! failure: callers clear their surface and stop.

use thiserror::Error;
use tracing::debug;

use crate::data::data_view::{DataView, VisualUpdateOptions};
use crate::data::datatable::{DataColumn, DataRow, DataTable, DataValue};

/// Why a candidate data view cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeInvalid {
    #[error("update carries no data view")]
    MissingDataView,
    #[error("data view has no table")]
    MissingTable,
    #[error("table has no rows")]
    MissingRows,
    #[error("table has no columns")]
    MissingColumns,
    #[error("data view has no metadata")]
    MissingMetadata,
    #[error("table rows are not a list")]
    MalformedRows,
    #[error("row {row} is not a list of cells")]
    MalformedRow { row: usize },
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub struct DataViewValidator;

impl DataViewValidator {
    /// Validate the first data view of an update event
    pub fn validate_update(options: &VisualUpdateOptions) -> Result<DataTable, ShapeInvalid> {
        let view = options.first_view().ok_or(ShapeInvalid::MissingDataView)?;
        Self::validate(view)
    }

    /// Validate one data view.
    ///
    /// The view is only borrowed; the returned table owns copies of its
    /// columns and rows.
    pub fn validate(candidate: &DataView) -> Result<DataTable, ShapeInvalid> {
        let table_view = candidate.table.as_ref().ok_or(ShapeInvalid::MissingTable)?;
        let rows = table_view.rows.as_ref().ok_or(ShapeInvalid::MissingRows)?;
        let columns = table_view
            .columns
            .as_ref()
            .ok_or(ShapeInvalid::MissingColumns)?;
        candidate
            .metadata
            .as_ref()
            .ok_or(ShapeInvalid::MissingMetadata)?;
        let rows = rows.as_array().ok_or(ShapeInvalid::MalformedRows)?;

        let mut table = DataTable::new();
        for (position, column) in columns.iter().enumerate() {
            table.add_column(DataColumn::new(
                column.display_name.clone(),
                column.index.unwrap_or(position),
            ));
        }

        for (index, cells) in rows.iter().enumerate() {
            let cells = cells
                .as_array()
                .ok_or(ShapeInvalid::MalformedRow { row: index })?;
            let row = DataRow::new(cells.iter().map(DataValue::from_json).collect());
            if table.add_row(row).is_err() {
                return Err(ShapeInvalid::RaggedRow {
                    row: index,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
        }

        debug!(
            "Data view accepted: {} columns, {} rows",
            table.column_count(),
            table.row_count()
        );
        Ok(table)
    }
}
