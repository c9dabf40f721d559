//! Error types shared across the workspace

use thiserror::Error;

/// Caller errors: inputs that break a documented precondition.
///
/// These are programmer mistakes rather than runtime failures, and are
/// reported instead of being silently worked around.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("Cannot categorize against an empty prototype list")]
    EmptyPrototypes,

    #[error("Vector dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
}

impl ContractViolation {
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        ContractViolation::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
