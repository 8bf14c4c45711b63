//! Utility helpers shared by the library and the command-line host.

pub mod logging;
