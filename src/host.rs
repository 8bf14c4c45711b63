//! Collaborator interfaces provided by the hosting runtime
//!
//! The host drives update events, owns the display container and performs
//! the actual file save. Only the calls this crate needs are modelled.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::settings::PropertyDescriptor;
use crate::data::data_exporter::ExportPayload;
use crate::data::data_view::VisualUpdateOptions;
use crate::ui::export_trigger::ExportTrigger;

/// Lifecycle calls the host makes on a visual
pub trait Visual {
    /// Called once per dataset update; updates are delivered one at a time
    fn on_data_changed(&mut self, options: &VisualUpdateOptions);

    /// Properties to show in the host's property pane
    fn describe_configurable_properties(&self) -> Vec<PropertyDescriptor>;
}

/// Host-owned container the table is rendered into
pub trait RenderSurface {
    /// Remove every header row, body row and the export control.
    /// Clearing an empty surface is a no-op.
    fn clear(&mut self);

    fn append_header_row(&mut self, headers: &[String]);

    fn append_body_row(&mut self, cells: &[String]);

    /// Bind the export control for the current render cycle
    fn attach_export_control(&mut self, trigger: ExportTrigger);

    fn export_control(&self) -> Option<&ExportTrigger>;

    /// True when nothing is rendered and no export control is bound
    fn is_empty(&self) -> bool;
}

/// Host file-save mechanism
pub trait FileSaver {
    /// Persist the payload under its own filename, returning where it went
    fn save_as(&self, payload: &ExportPayload) -> Result<PathBuf>;
}

/// Saves payloads into a fixed directory, overwriting earlier downloads
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DirectorySaver {
    /// Only the final component of the payload filename is used, so the
    /// file always lands directly inside `dir`
    fn save_as(&self, payload: &ExportPayload) -> Result<PathBuf> {
        let name = Path::new(&payload.filename)
            .file_name()
            .ok_or_else(|| anyhow!("Invalid export filename: {:?}", payload.filename))?;
        let path = self.dir.join(name);
        fs::write(&path, &payload.bytes)
            .with_context(|| format!("Failed to save {}", path.display()))?;

        info!(
            "Saved {} bytes ({}) to {}",
            payload.bytes.len(),
            payload.mime_type,
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn payload_named(filename: &str) -> ExportPayload {
        ExportPayload {
            filename: filename.to_string(),
            mime_type: "text/plain;charset=utf-8",
            bytes: b"A\r\n1\r\n".to_vec(),
        }
    }

    fn payload() -> ExportPayload {
        payload_named("pbidownload.csv")
    }

    #[test]
    fn test_directory_saver_writes_file() {
        let dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(dir.path());

        let path = saver.save_as(&payload()).unwrap();
        assert_eq!(path, dir.path().join("pbidownload.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"A\r\n1\r\n");
    }

    #[test]
    fn test_directory_saver_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(dir.path().join("missing"));

        let err = saver.save_as(&payload()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to save"));
    }

    #[test]
    fn test_directory_saver_stays_inside_dir() {
        let root = TempDir::new().unwrap();
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();
        let saver = DirectorySaver::new(&out);

        let path = saver.save_as(&payload_named("../escaped.csv")).unwrap();
        assert_eq!(path, out.join("escaped.csv"));
        assert!(!root.path().join("escaped.csv").exists());

        let abs = root.path().join("abs.csv");
        let path = saver
            .save_as(&payload_named(&abs.to_string_lossy()))
            .unwrap();
        assert_eq!(path, out.join("abs.csv"));
        assert!(!abs.exists());
    }

    #[test]
    fn test_directory_saver_rejects_nameless_filename() {
        let dir = TempDir::new().unwrap();
        let saver = DirectorySaver::new(dir.path());

        let err = saver.save_as(&payload_named("..")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid export filename"));
    }
}
