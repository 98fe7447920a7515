//! Text rendering for the terminal wizard.
//!
//! - `status_bar` - key hints under each menu
//! - `step_indicator` - the six-step progress line
//! - `summary` - amounts, package cards and the final review

mod status_bar;
mod step_indicator;
mod summary;

pub use status_bar::{KeyHint, build_status_bar, hints};
pub use step_indicator::{progress_label, step_indicator};
pub use summary::{
    comparison_line, format_rupees, package_card, package_option_label, room_lines,
    summary_text,
};
