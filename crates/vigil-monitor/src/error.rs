//! Sampling error types

use thiserror::Error;

/// Failure to obtain a text sample for one tick.
///
/// Never fatal: the tick is skipped and the next one proceeds on schedule.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Sample unavailable: {0}")]
    Unavailable(String),

    #[error("Sample timed out")]
    Timeout,
}
