use blobkit_errors::prelude::*;
use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{}", .0.detailed())]
pub struct StoreError(pub Box<ErrorObj>);

impl StoreError {
    pub fn into_inner(self) -> ErrorObj {
        *self.0
    }

    pub fn code(&self) -> ErrorCode {
        self.0.code
    }

    /// Developer detail plus causes, falling back to the user message.
    pub fn details(&self) -> String {
        let mut text = self
            .0
            .message_dev
            .clone()
            .unwrap_or_else(|| self.0.message_user.clone());
        for cause in self.0.cause_chain.iter().flatten() {
            text.push_str("  [caused by: ");
            text.push_str(&cause.summary);
            text.push(']');
        }
        text
    }

    pub fn provider_unavailable(msg: &str) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::PROVIDER_UNAVAILABLE)
                .user_msg("Storage provider unavailable.")
                .dev_msg(msg),
        )
    }

    /// Wraps a backend error, keeping its whole `source()` chain.
    pub fn provider(context: &str, err: &(dyn StdError + 'static)) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::PROVIDER_UNAVAILABLE)
                .user_msg("Storage provider request failed.")
                .dev_msg(format!("{context}: {err}"))
                .causes(cause_chain(err)),
        )
    }

    pub fn io(context: &str, err: &std::io::Error) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::STORAGE_IO)
                .dev_msg(format!("{context}: {err}"))
                .causes(cause_chain(err)),
        )
    }

    pub fn not_found(msg: &str) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::STORAGE_NOT_FOUND)
                .user_msg("Object not found.")
                .dev_msg(msg),
        )
    }

    pub fn invalid_path(msg: &str) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::PATH_INVALID_BLOB)
                .user_msg("Invalid blob path.")
                .dev_msg(msg),
        )
    }

    pub fn invalid_connection(msg: &str) -> Self {
        Self::from_builder(
            ErrorBuilder::new(codes::CONFIG_INVALID)
                .user_msg("Invalid storage connection string.")
                .dev_msg(msg),
        )
    }

    fn from_builder(builder: ErrorBuilder) -> Self {
        StoreError(Box::new(builder.build()))
    }
}

impl From<ErrorObj> for StoreError {
    fn from(value: ErrorObj) -> Self {
        StoreError(Box::new(value))
    }
}
