//! Export control binding
//!
//! A trigger is created fresh for every render cycle and owns a snapshot of
//! that cycle's render model. Clicking an old trigger therefore exports the
//! data it was rendered with, never whatever was rendered later.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::settings::ExportSettings;
use crate::data::data_exporter::{DataExporter, ExportPayload};
use crate::data::projector::RenderModel;
use crate::host::FileSaver;

/// Result of a data export operation
#[derive(Debug)]
pub enum ExportResult {
    Success(String),
    Error(anyhow::Error),
}

impl ExportResult {
    /// Apply the result to a status handler (success message or error)
    pub fn apply_to_status<F, G>(self, set_status: F, set_error: G)
    where
        F: FnOnce(String),
        G: FnOnce(&str, anyhow::Error),
    {
        match self {
            ExportResult::Success(message) => set_status(message),
            ExportResult::Error(e) => set_error("Export failed", e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExportResult::Success(_))
    }
}

#[derive(Debug, Clone)]
pub struct ExportTrigger {
    model: Arc<RenderModel>,
    settings: ExportSettings,
    cycle: u64,
}

impl ExportTrigger {
    pub fn new(model: Arc<RenderModel>, settings: ExportSettings, cycle: u64) -> Self {
        Self {
            model,
            settings,
            cycle,
        }
    }

    /// Caption shown on the control
    pub fn label(&self) -> String {
        format!("Download {}", self.settings.format)
    }

    /// Render cycle this trigger was bound in
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Serialize the captured model; regenerated on every call
    pub fn payload(&self) -> anyhow::Result<ExportPayload> {
        DataExporter::build_payload(&self.model, &self.settings)
    }

    /// Handle a click: serialize, then hand the payload to the host once.
    /// Save failures come back unchanged; there is no retry.
    pub fn invoke(&self, saver: &dyn FileSaver) -> ExportResult {
        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(e) => return ExportResult::Error(e),
        };

        info!(
            "Export requested (cycle {}): {} rows as {}",
            self.cycle,
            self.model.row_count(),
            payload.filename
        );

        match saver.save_as(&payload) {
            Ok(path) => ExportResult::Success(format!(
                "✓ Exported {} rows to {} file: {}",
                self.model.row_count(),
                self.settings.format,
                path.display()
            )),
            Err(e) => {
                warn!("Save of {} failed: {}", payload.filename, e);
                ExportResult::Error(e)
            }
        }
    }
}
