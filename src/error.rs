//! Error types for panel coordination.

use thiserror::Error;

/// Main error type for panel operations.
///
/// Both variants originate in the data-service collaborators; the
/// coordination core never constructs a failure of its own. Coordinators
/// store the error for the embedding view and clear the derived state that
/// depended on the failed fetch.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("Metadata fetch failed: {0}")]
    MetadataFetch(String),

    #[error("Records fetch failed: {0}")]
    RecordsFetch(String),
}

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;
