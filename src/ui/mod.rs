//! Presentation side: render surfaces, the render/clear cycle and the
//! export control bound to each render.

pub mod export_trigger;
pub mod html_surface;
pub mod table_visual;
pub mod terminal_surface;
