//! Render/clear cycle of the table visual
//!
//! Every update clears the surface first, then validates. A rejected data
//! view leaves the surface empty; an accepted one is projected and rendered
//! in full together with a newly bound export control.

use std::sync::Arc;
use tracing::debug;

use crate::config::settings::{PropertyDescriptor, VisualSettings};
use crate::data::data_provider::DataProvider;
use crate::data::data_view::VisualUpdateOptions;
use crate::data::projector::{RenderModel, TableProjector};
use crate::data::validator::DataViewValidator;
use crate::host::{RenderSurface, Visual};
use crate::ui::export_trigger::ExportTrigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Empty,
    Rendered { rows: usize, columns: usize },
}

pub struct TableVisual<S: RenderSurface> {
    surface: S,
    defaults: VisualSettings,
    settings: Option<VisualSettings>,
    state: RenderState,
    cycle: u64,
}

impl<S: RenderSurface> TableVisual<S> {
    pub fn new(surface: S, defaults: VisualSettings) -> Self {
        Self {
            surface,
            defaults,
            settings: None,
            state: RenderState::Empty,
            cycle: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Number of update events processed so far
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Settings of the latest update, or the defaults before the first one
    pub fn settings(&self) -> &VisualSettings {
        self.settings.as_ref().unwrap_or(&self.defaults)
    }

    /// Run one full clear -> validate -> project -> render cycle
    pub fn update(&mut self, options: &VisualUpdateOptions) -> RenderState {
        self.cycle += 1;
        let metadata = options.first_view().and_then(|view| view.metadata.as_ref());
        let settings = VisualSettings::parse(metadata, &self.defaults);

        self.surface.clear();
        self.state = RenderState::Empty;

        let dataset = match DataViewValidator::validate_update(options) {
            Ok(dataset) => dataset,
            Err(reason) => {
                debug!("Update {} rejected, nothing to draw: {}", self.cycle, reason);
                self.settings = Some(settings);
                return self.state;
            }
        };

        let model = TableProjector::project(&dataset, settings.display.cell_rendering);
        self.materialize(&model);

        self.state = RenderState::Rendered {
            rows: model.row_count(),
            columns: model.column_count(),
        };

        let trigger = ExportTrigger::new(Arc::new(model), settings.export.clone(), self.cycle);
        self.surface.attach_export_control(trigger);
        self.settings = Some(settings);

        debug!("Update {} rendered: {:?}", self.cycle, self.state);
        self.state
    }

    fn materialize(&mut self, model: &RenderModel) {
        self.surface.append_header_row(&model.get_column_names());
        for row in model.get_visible_rows(0, model.get_row_count()) {
            self.surface.append_body_row(&row);
        }
    }
}

impl<S: RenderSurface> Visual for TableVisual<S> {
    fn on_data_changed(&mut self, options: &VisualUpdateOptions) {
        self.update(options);
    }

    fn describe_configurable_properties(&self) -> Vec<PropertyDescriptor> {
        self.settings().enumerate_properties()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::data_exporter::ExportFormat;
    use crate::data::data_view::{DataView, DataViewColumn, TableView};
    use crate::ui::html_surface::HtmlTableSurface;
    use serde_json::json;

    fn options(rows: Vec<Vec<serde_json::Value>>) -> VisualUpdateOptions {
        VisualUpdateOptions::single(DataView {
            table: Some(TableView {
                columns: Some(vec![
                    DataViewColumn {
                        display_name: "Name".into(),
                        index: Some(0),
                    },
                    DataViewColumn {
                        display_name: "Age".into(),
                        index: Some(1),
                    },
                ]),
                rows: Some(json!(rows)),
            }),
            metadata: Some(json!({})),
        })
    }

    #[test]
    fn test_valid_update_renders() {
        let mut visual = TableVisual::new(HtmlTableSurface::new(), VisualSettings::default());
        let state = visual.update(&options(vec![vec![json!("Ann"), json!(30)]]));

        assert_eq!(state, RenderState::Rendered { rows: 1, columns: 2 });
        assert_eq!(visual.surface().body_rows().len(), 1);
        assert_eq!(visual.surface().export_control().unwrap().cycle(), 1);
    }

    #[test]
    fn test_repeated_updates_do_not_accumulate_rows() {
        let mut visual = TableVisual::new(HtmlTableSurface::new(), VisualSettings::default());
        let update = options(vec![vec![json!("Ann"), json!(30)], vec![json!("Bo"), json!(4)]]);

        visual.update(&update);
        visual.update(&update);

        assert_eq!(visual.surface().header_rows().len(), 1);
        assert_eq!(visual.surface().body_rows().len(), 2);
        assert_eq!(visual.cycle(), 2);
    }

    #[test]
    fn test_rejected_update_clears_previous_render() {
        let mut visual = TableVisual::new(HtmlTableSurface::new(), VisualSettings::default());
        visual.update(&options(vec![vec![json!("Ann"), json!(30)]]));

        let state = visual.update(&VisualUpdateOptions::default());
        assert_eq!(state, RenderState::Empty);
        assert!(visual.surface().is_empty());
        assert!(visual.surface().export_control().is_none());
    }

    #[test]
    fn test_metadata_overrides_apply_per_update() {
        let mut visual = TableVisual::new(HtmlTableSurface::new(), VisualSettings::default());
        let mut update = options(vec![]);
        update.data_views.as_mut().unwrap()[0].metadata =
            Some(json!({"columns": [], "objects": {"export": {"format": "json"}}}));

        visual.update(&update);
        assert_eq!(visual.settings().export.format, ExportFormat::Json);
        assert_eq!(
            visual.surface().export_control().unwrap().label(),
            "Download JSON"
        );

        // next update without overrides falls back to the defaults
        visual.update(&options(vec![]));
        assert_eq!(visual.settings().export.format, ExportFormat::Csv);
    }

    #[test]
    fn test_describe_properties_before_first_update_uses_defaults() {
        let visual = TableVisual::new(HtmlTableSurface::new(), VisualSettings::default());
        let props = visual.describe_configurable_properties();
        assert_eq!(props, VisualSettings::default().enumerate_properties());
    }
}
