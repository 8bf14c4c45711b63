//! Host-supplied data view shape
//!
//! These types mirror the structure the host hands over on each update.
//! Every structural field is optional: absence is an ordinary outcome that
//! the validator turns into a rejection, never a deserialization failure.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::data::datatable::{DataTable, DataValue};

/// Arguments of one host update event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualUpdateOptions {
    pub data_views: Option<Vec<DataView>>,
}

impl VisualUpdateOptions {
    pub fn single(view: DataView) -> Self {
        Self {
            data_views: Some(vec![view]),
        }
    }

    /// The only data view this visual consumes
    pub fn first_view(&self) -> Option<&DataView> {
        self.data_views.as_ref()?.first()
    }

    /// Parse update options from JSON text.
    /// A bare data view object (no `dataViews` key) is wrapped as the single view.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(text).context("Invalid JSON input")?;

        let is_options = value
            .as_object()
            .map(|obj| obj.contains_key("dataViews"))
            .unwrap_or(false);

        if is_options {
            serde_json::from_value(value).context("Malformed update options")
        } else {
            let view: DataView =
                serde_json::from_value(value).context("Malformed data view")?;
            Ok(Self::single(view))
        }
    }
}

/// One data view as delivered by the host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataView {
    pub table: Option<TableView>,
    /// Opaque apart from its presence; `objects` inside it carries
    /// per-update property overrides
    pub metadata: Option<JsonValue>,
}

impl DataView {
    /// Wrap a locally loaded table as a host data view with empty metadata
    pub fn from_table(table: &DataTable) -> Self {
        let columns = table
            .columns
            .iter()
            .map(|c| DataViewColumn {
                display_name: c.display_name.clone(),
                index: Some(c.ordinal),
            })
            .collect();
        let rows = table
            .rows
            .iter()
            .map(|row| JsonValue::Array(row.values.iter().map(DataValue::to_json).collect()))
            .collect();

        Self {
            table: Some(TableView {
                columns: Some(columns),
                rows: Some(JsonValue::Array(rows)),
            }),
            metadata: Some(JsonValue::Object(Default::default())),
        }
    }
}

/// Table-shaped projection of a data view.
/// `rows` stays raw JSON so a malformed row list is a validation outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Option<Vec<DataViewColumn>>,
    pub rows: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViewColumn {
    #[serde(default)]
    pub display_name: String,
    pub index: Option<usize>,
}
