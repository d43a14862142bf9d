//! Collaborator service traits.
//!
//! The platform's data services are opaque to this crate: each trait
//! returns shaped data or a fetch error, and the coordinators treat a call
//! as the completion callback of an asynchronous fetch. Retry and timeout
//! policy belong to implementations, not to the coordination core.

use crate::error::Result;
use crate::types::{ObjectInfo, RelatedListDescriptor, RelatedListInfo, RelatedListRecords};

/// Metadata for a single related list of a parent object.
pub trait RelatedListMetadataService: Send + Sync {
    /// Resolve the target object type and display columns for
    /// `related_list_id` on `parent_object_api_name`.
    fn related_list_info(
        &self,
        parent_object_api_name: &str,
        related_list_id: &str,
    ) -> Result<RelatedListInfo>;
}

/// Records belonging to a related list of a parent record.
pub trait RelatedListRecordsService: Send + Sync {
    /// Fetch the list's records with the given qualified field names
    /// (`Target.Field`).
    fn related_list_records(
        &self,
        parent_record_id: &str,
        related_list_id: &str,
        fields: &[String],
    ) -> Result<RelatedListRecords>;
}

/// Object-level metadata, reduced to theme info.
pub trait ObjectMetadataService: Send + Sync {
    fn object_info(&self, object_api_name: &str) -> Result<ObjectInfo>;
}

/// All related lists defined on a parent object type.
pub trait AllRelatedListsService: Send + Sync {
    fn related_lists(&self, parent_object_api_name: &str) -> Result<Vec<RelatedListDescriptor>>;
}
