use crate::model::CauseEntry;
use std::error::Error as StdError;

/// Renders an error and its whole `source()` chain on one line.
///
/// `"outer  [caused by: middle  [caused by: inner]]"`
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    if let Some(source) = err.source() {
        message.push_str("  [caused by: ");
        message.push_str(&describe(source));
        message.push(']');
    }
    message
}

/// The `source()` chain below `err`, outermost first.
pub fn cause_chain(err: &(dyn StdError + 'static)) -> Vec<CauseEntry> {
    let mut chain = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push(CauseEntry::new("source", cause.to_string()));
        current = cause.source();
    }
    chain
}
