//! Projection of a validated table into display strings
//!
//! The render model is rebuilt in full on every update and never patched.
//! Each cell keeps its typed value next to its display text so the
//! structured export can stay lossless.

use serde::{Deserialize, Serialize};

use crate::data::data_provider::DataProvider;
use crate::data::datatable::{DataTable, DataValue};

/// Which cell values render as an empty string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellRendering {
    /// Only absent (null) cells are blank; `0` and `false` render as themselves
    #[default]
    AbsentOnly,
    /// Loose truthiness: null, `false`, zero, NaN and `""` are all blank
    Falsy,
}

impl CellRendering {
    pub fn cell_text(self, value: &DataValue) -> String {
        let blank = match self {
            CellRendering::AbsentOnly => value.is_null(),
            CellRendering::Falsy => value.is_falsy(),
        };
        if blank {
            String::new()
        } else {
            value.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCell {
    pub value: DataValue,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow {
    pub cells: Vec<RenderCell>,
}

impl RenderRow {
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.text.clone()).collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &DataValue> {
        self.cells.iter().map(|c| &c.value)
    }
}

/// Header list plus body rows, ready to render or export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderModel {
    pub headers: Vec<String>,
    pub rows: Vec<RenderRow>,
}

impl RenderModel {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

impl DataProvider for RenderModel {
    fn get_row(&self, index: usize) -> Option<Vec<String>> {
        self.rows.get(index).map(RenderRow::texts)
    }

    fn get_column_names(&self) -> Vec<String> {
        self.headers.clone()
    }

    fn get_row_count(&self) -> usize {
        self.row_count()
    }

    fn get_column_count(&self) -> usize {
        self.column_count()
    }
}

pub struct TableProjector;

impl TableProjector {
    /// Project every column and row, in order, without filtering
    pub fn project(dataset: &DataTable, rendering: CellRendering) -> RenderModel {
        let headers = dataset.column_names();
        let rows = dataset
            .rows
            .iter()
            .map(|row| RenderRow {
                cells: row
                    .values
                    .iter()
                    .map(|value| RenderCell {
                        text: rendering.cell_text(value),
                        value: value.clone(),
                    })
                    .collect(),
            })
            .collect();

        RenderModel { headers, rows }
    }
}
