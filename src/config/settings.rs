//! Runtime settings for the table visual
//!
//! Settings start from the configured defaults and are re-parsed on every
//! update from the data view's `metadata.objects`, the same objects the
//! host's property pane edits.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::data::data_exporter::{CsvQuoting, ExportFormat};
use crate::data::projector::CellRendering;

pub const DEFAULT_FILE_STEM: &str = "pbidownload";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    pub display: DisplaySettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Which cells render blank
    pub cell_rendering: CellRendering,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub quoting: CsvQuoting,
    /// File name without extension
    pub file_stem: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            quoting: CsvQuoting::Minimal,
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

impl ExportSettings {
    pub fn filename(&self) -> String {
        format!("{}.{}", self.file_stem, self.format.extension())
    }
}

/// A stem must name a file in the export directory, nothing else
fn is_plain_file_stem(stem: &str) -> bool {
    !stem.trim().is_empty()
        && !stem.contains("..")
        && !stem.chars().any(|c| matches!(c, '/' | '\\' | ':' | '\0'))
}

/// One property exposed to the host's property pane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub object_name: String,
    pub property_name: String,
    pub value: Value,
}

impl VisualSettings {
    /// Overlay `metadata.objects` on top of `base`.
    /// Unknown keys are ignored; an override that fails to parse leaves
    /// `base` untouched. A file stem that is not a plain file name falls
    /// back to `DEFAULT_FILE_STEM`.
    pub fn parse(metadata: Option<&Value>, base: &VisualSettings) -> VisualSettings {
        let mut settings = Self::overlay_objects(metadata, base);
        if !is_plain_file_stem(&settings.export.file_stem) {
            warn!(
                "Ignoring export file stem {:?}, using {}",
                settings.export.file_stem, DEFAULT_FILE_STEM
            );
            settings.export.file_stem = DEFAULT_FILE_STEM.to_string();
        }
        settings
    }

    fn overlay_objects(metadata: Option<&Value>, base: &VisualSettings) -> VisualSettings {
        let Some(objects) = metadata
            .and_then(|m| m.get("objects"))
            .filter(|objects| !objects.is_null())
        else {
            return base.clone();
        };

        let mut merged = match serde_json::to_value(base) {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not encode settings for merge: {}", e);
                return base.clone();
            }
        };
        merge_json(&mut merged, objects);

        match serde_json::from_value(merged) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring invalid property overrides: {}", e);
                base.clone()
            }
        }
    }

    /// Flatten every object/property pair for the host property pane
    pub fn enumerate_properties(&self) -> Vec<PropertyDescriptor> {
        let Ok(Value::Object(objects)) = serde_json::to_value(self) else {
            return Vec::new();
        };

        let mut descriptors = Vec::new();
        for (object_name, properties) in objects {
            if let Value::Object(properties) = properties {
                for (property_name, value) in properties {
                    descriptors.push(PropertyDescriptor {
                        object_name: object_name.clone(),
                        property_name,
                        value,
                    });
                }
            }
        }
        descriptors
    }
}

fn merge_json(target: &mut Value, overrides: &Value) {
    match (target, overrides) {
        (Value::Object(target), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match target.get_mut(key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, value) => *target = value.clone(),
    }
}
