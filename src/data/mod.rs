//! Data layer: host data view -> validated table -> render model -> export payload
//!
//! This module keeps the data pipeline free of any presentation concerns.

pub mod data_exporter;
pub mod data_provider;
pub mod data_view;
pub mod datatable;
pub mod projector;
pub mod validator;
