//! Coordinator for the full set of related lists on an object.

use crate::error::PanelError;
use crate::reactive::InputMemo;
use crate::services::AllRelatedListsService;
use crate::types::RelatedListDescriptor;
use std::sync::Arc;
use tracing::warn;

/// Related lists the records service cannot serve yet.
pub const UNSUPPORTED_RELATED_LISTS: [&str; 4] = [
    "Open Activities",
    "Activity History",
    "Notes & Attachments",
    "Partners",
];

/// Lists the related lists available for one object type.
pub struct AllRelatedListsPanel {
    service: Arc<dyn AllRelatedListsService>,
    object_api_name: Option<String>,
    related_lists: Option<Vec<RelatedListDescriptor>>,
    error: Option<PanelError>,
    fetch_memo: InputMemo<String>,
}

impl AllRelatedListsPanel {
    pub fn new(service: Arc<dyn AllRelatedListsService>) -> Self {
        Self {
            service,
            object_api_name: None,
            related_lists: None,
            error: None,
            fetch_memo: InputMemo::new(),
        }
    }

    /// Set the object context. Refetches only when the name changes.
    pub fn set_object_api_name(&mut self, object_api_name: impl Into<String>) {
        let object_api_name = object_api_name.into();
        self.object_api_name = Some(object_api_name.clone());
        if self.fetch_memo.changed(object_api_name.clone()) {
            self.refresh(&object_api_name);
        }
    }

    fn refresh(&mut self, object_api_name: &str) {
        match self.service.related_lists(object_api_name) {
            Ok(lists) => {
                self.related_lists = Some(
                    lists
                        .into_iter()
                        .filter(|rl| !UNSUPPORTED_RELATED_LISTS.contains(&rl.label.as_str()))
                        .collect(),
                );
                self.error = None;
            }
            Err(e) => {
                warn!(object = object_api_name, error = %e, "related lists fetch failed");
                self.error = Some(e);
                self.related_lists = None;
            }
        }
    }

    pub fn object_api_name(&self) -> Option<&str> {
        self.object_api_name.as_deref()
    }

    pub fn related_lists(&self) -> Option<&[RelatedListDescriptor]> {
        self.related_lists.as_deref()
    }

    pub fn error(&self) -> Option<&PanelError> {
        self.error.as_ref()
    }
}
