//! Trailing-window text scanning
//!
//! Matching is bounded to the last [`WINDOW_LINES`] lines of a sample so a
//! long-running page cannot make a tick arbitrarily expensive, and so that
//! recent signal wins over historical noise.

use regex::Regex;

/// Number of trailing lines a sample is reduced to before matching.
pub const WINDOW_LINES: usize = 50;

/// Keep only the last `max_lines` lines of `text`, order preserved.
pub fn trailing_window(text: &str, max_lines: usize) -> String {
    let mut lines: Vec<&str> = text.lines().rev().take(max_lines).collect();
    lines.reverse();
    lines.join("\n")
}

/// Count non-overlapping occurrences of `keyword` within `window`.
///
/// The keyword is compiled as a regex; a pattern that fails to compile is
/// matched as an escaped literal instead of disabling the rule.
pub fn count_matches(keyword: &str, window: &str) -> usize {
    let pattern = match Regex::new(keyword) {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!(keyword, error = %e, "keyword is not a valid regex; matching literally");
            match Regex::new(&regex::escape(keyword)) {
                Ok(re) => re,
                // Escaped literals always compile; keep the rule inert if not.
                Err(_) => return 0,
            }
        }
    };

    pattern.find_iter(window).count()
}
