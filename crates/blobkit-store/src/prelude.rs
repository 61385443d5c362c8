pub use crate::accessor::{FileAccessor, NO_CONNECTION_STRING, NO_CONTAINER_NAME};
pub use crate::conn::{connect, ConnectionString};
pub use crate::errors::StoreError;
#[cfg(feature = "backend-fs")]
pub use crate::fs::FsBlobProvider;
pub use crate::metrics::{AccessStats, AccessStatsSnapshot};
pub use crate::model::BlobItem;
pub use crate::outcome::Outcome;
pub use crate::path::{
    parse_blob_path, validate_blob_path, validate_container_name, PathParts, ValidationError,
    Violation, ViolationKind, NO_FILE_PATH,
};
pub use crate::r#trait::{BlobProvider, BlobReader, BlobWriter};
pub use crate::text::{debug_display, non_blank, user_friendly, NOT_PROVIDED};
