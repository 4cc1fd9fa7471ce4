//! Helper functions shared by the view layer

pub mod date;
pub mod html;

pub use date::{display_date, format_pt_br};
pub use html::html_escape;
