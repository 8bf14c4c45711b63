use crate::config::settings::ExportSettings;
use crate::data::data_provider::DataProvider;
use crate::data::projector::RenderModel;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

const LINE_TERMINATOR: &str = "\r\n";

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/plain;charset=utf-8",
            ExportFormat::Json => "application/json;charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(anyhow!("Unknown export format '{}'", other)),
        }
    }
}

/// Field quoting for the delimited format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Write text as-is; a field containing the delimiter corrupts the line
    None,
    /// Quote fields holding a comma, quote, CR or LF and double embedded quotes
    #[default]
    Minimal,
}

impl FromStr for CsvQuoting {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CsvQuoting::None),
            "minimal" => Ok(CsvQuoting::Minimal),
            other => Err(anyhow!("Unknown quoting mode '{}'", other)),
        }
    }
}

/// Serialized export, regenerated for every export action
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serializes render models into export payloads
pub struct DataExporter;

impl DataExporter {
    /// Serialize a model in the given format. Pure and deterministic.
    pub fn serialize(model: &RenderModel, format: ExportFormat, quoting: CsvQuoting) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Csv => Ok(Self::provider_to_csv(model, quoting).into_bytes()),
            ExportFormat::Json => Self::model_to_json(model),
        }
    }

    /// Build the downloadable payload for the configured format
    pub fn build_payload(model: &RenderModel, settings: &ExportSettings) -> Result<ExportPayload> {
        let bytes = Self::serialize(model, settings.format, settings.quoting)?;
        Ok(ExportPayload {
            filename: settings.filename(),
            mime_type: settings.format.mime_type(),
            bytes,
        })
    }

    /// Delimited text from any provider: header line, then one line per row,
    /// every line CRLF-terminated
    pub fn provider_to_csv(provider: &dyn DataProvider, quoting: CsvQuoting) -> String {
        let mut csv_text = String::new();

        Self::push_csv_line(&mut csv_text, &provider.get_column_names(), quoting);

        for i in 0..provider.get_row_count() {
            if let Some(row) = provider.get_row(i) {
                Self::push_csv_line(&mut csv_text, &row, quoting);
            }
        }

        csv_text
    }

    /// Header list followed by the typed body rows as one JSON array
    pub fn model_to_json(model: &RenderModel) -> Result<Vec<u8>> {
        let mut rows = Vec::with_capacity(model.row_count() + 1);
        rows.push(Value::Array(
            model.headers.iter().cloned().map(Value::String).collect(),
        ));
        for row in &model.rows {
            rows.push(Value::Array(row.values().map(|v| v.to_json()).collect()));
        }

        Ok(serde_json::to_vec(&rows)?)
    }

    fn push_csv_line(out: &mut String, fields: &[String], quoting: CsvQuoting) {
        let line: Vec<Cow<'_, str>> = fields
            .iter()
            .map(|field| match quoting {
                CsvQuoting::None => Cow::Borrowed(field.as_str()),
                CsvQuoting::Minimal => Self::escape_csv_field(field),
            })
            .collect();
        out.push_str(&line.join(","));
        out.push_str(LINE_TERMINATOR);
    }

    /// Helper to escape CSV fields that contain special characters
    fn escape_csv_field(field: &str) -> Cow<'_, str> {
        if field.contains([',', '"', '\n', '\r']) {
            // Escape quotes by doubling them and wrap field in quotes
            Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(field)
        }
    }
}
