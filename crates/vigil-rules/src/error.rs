//! Rule error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Rule index out of range: {index} (rule count: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
