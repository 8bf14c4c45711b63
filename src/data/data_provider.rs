//! Data provider trait for abstracting data access
//!
//! The render cycle and the delimited exporter read display rows through
//! this trait rather than reaching into `RenderModel` directly.

use std::fmt::Debug;

/// Core trait for read-only data access
///
/// This trait defines the minimal interface that any data source must provide
/// to be usable for rendering and export.
pub trait DataProvider: Send + Sync + Debug {
    /// Get a single row by index
    /// Returns None if the index is out of bounds
    fn get_row(&self, index: usize) -> Option<Vec<String>>;

    /// Get the column names/headers
    fn get_column_names(&self) -> Vec<String>;

    /// Get the total number of rows
    fn get_row_count(&self) -> usize;

    /// Get the total number of columns
    fn get_column_count(&self) -> usize;

    /// Get multiple rows at once
    fn get_visible_rows(&self, start: usize, count: usize) -> Vec<Vec<String>> {
        let end = (start + count).min(self.get_row_count());
        (start..end).filter_map(|i| self.get_row(i)).collect()
    }
}
