//! Error domain shared by the blobkit crates.
//!
//! Every failure is described by an [`ErrorObj`](model::ErrorObj) whose code is
//! registered in [`code::REGISTRY`]. The registry fixes the kind, retry class and
//! severity for each code so callers only choose the code and the messages.

pub mod code;
pub mod kind;
pub mod labels;
pub mod model;
pub mod prelude;
pub mod render;
pub mod retry;
pub mod severity;
pub mod wrap;
