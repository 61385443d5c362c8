//! Blob storage access for blobkit.
//!
//! [`FileAccessor`] is the entry point: it takes `container/path` strings,
//! validates them with [`path`], and drives a [`BlobProvider`] backend.
//! Expected failures come back as [`Outcome`] error lines.

pub mod accessor;
#[cfg(feature = "backend-azure")]
pub mod azure;
pub mod conn;
pub mod errors;
#[cfg(feature = "backend-fs")]
pub mod fs;
pub mod metrics;
pub mod model;
pub mod outcome;
pub mod path;
pub mod prelude;
pub mod text;
pub mod r#trait;

pub use crate::accessor::FileAccessor;
#[cfg(feature = "backend-azure")]
pub use crate::azure::AzureBlobProvider;
pub use crate::conn::{connect, ConnectionString};
pub use crate::errors::StoreError;
#[cfg(feature = "backend-fs")]
pub use crate::fs::FsBlobProvider;
pub use crate::metrics::{AccessStats, AccessStatsSnapshot};
pub use crate::model::BlobItem;
pub use crate::outcome::Outcome;
pub use crate::path::{PathParts, ValidationError, Violation, ViolationKind};
pub use crate::r#trait::{BlobProvider, BlobReader, BlobWriter};
