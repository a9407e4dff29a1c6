//! Turn-level errors

use crate::llm::LlmError;
use crate::store::StoreError;
use thiserror::Error;

/// Failures that abort a turn. Search failures never appear here; they
/// degrade to an unaugmented prompt.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("language model invocation failed: {0}")]
    ModelInvocationFailed(#[from] LlmError),

    #[error("persistence failed: {0}")]
    PersistenceFailed(#[from] StoreError),
}
