//! Vigil Monitor Rules
//!
//! An ordered set of (keyword, threshold, message) rules evaluated against
//! the trailing window of a session's rendered text. Rule sets are plain
//! values: every session owns its own copy and mutating one never affects
//! another.

mod error;
mod rule;
mod scan;

pub use error::RuleError;
pub use rule::{MonitorRule, RuleSet};
pub use scan::{count_matches, trailing_window, WINDOW_LINES};

pub type Result<T> = std::result::Result<T, RuleError>;
