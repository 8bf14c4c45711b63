//! Render a host-supplied tabular data view as a table and export the same
//! data as a CSV or JSON download.
//!
//! The pipeline lives in [`data`]: a [`data::data_view::DataView`] is checked
//! by [`data::validator::DataViewValidator`], projected into a
//! [`data::projector::RenderModel`] and serialized by
//! [`data::data_exporter::DataExporter`]. [`ui::table_visual::TableVisual`]
//! drives one clear/render cycle per host update.

pub mod config;
pub mod data;
pub mod host;
pub mod ui;
pub mod utils;
