use thiserror::Error;

/// A storage operation finished with error lines that were already printed.
#[derive(Debug, Error)]
#[error("{operation} failed with {errors} error(s)")]
pub struct OperationFailed {
    pub operation: &'static str,
    pub errors: usize,
}

impl OperationFailed {
    pub fn new(operation: &'static str, errors: usize) -> Self {
        Self { operation, errors }
    }
}
