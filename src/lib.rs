//! # Related Records
//!
//! Record-selection coordination for the related lists on a record-detail
//! page: an in-process selection bus, three panel coordinators, and icon
//! resolution from themed icon URLs.
//!
//! ## Core Concepts
//!
//! - **Selection bus**: synchronous in-page fan-out of "a record was
//!   selected" events, with per-subscriber failure isolation
//! - **Panels**: thin coordinators wiring opaque data services into view
//!   state (rows, columns, selected record, icon, error)
//! - **Services**: traits for the platform's metadata and records fetches;
//!   this crate only consumes them
//!
//! ## Example
//!
//! ```ignore
//! use related_records::{RelatedListPanel, SelectedRecordPanel, SelectionBus};
//! use std::sync::Arc;
//!
//! let bus = Arc::new(SelectionBus::new());
//!
//! let list = RelatedListPanel::new(bus.clone(), metadata, records, objects.clone());
//! list.connect();
//! list.set_object_api_name("Account");
//! list.set_record_id("001xx0000001");
//! list.set_related_list_id("Contacts");
//!
//! let detail = SelectedRecordPanel::new(bus.clone(), objects);
//! detail.connect();
//!
//! // User activates a row: the detail panel adopts it.
//! list.activate_row("003xx0000007");
//! assert!(detail.has_selected_record());
//! ```

pub mod bus;
pub mod error;
pub mod icon;
pub mod panels;
pub mod reactive;
pub mod services;
pub mod types;

// Re-exports
pub use bus::{SelectionBus, Subscription, SubscriptionId};
pub use error::{PanelError, Result};
pub use icon::{resolve_icon, IconIdentifier};
pub use panels::{
    AllRelatedListsPanel, RelatedListPanel, SelectedRecordPanel, UNSUPPORTED_RELATED_LISTS,
};
pub use reactive::InputMemo;
pub use services::{
    AllRelatedListsService, ObjectMetadataService, RelatedListMetadataService,
    RelatedListRecordsService,
};
pub use types::*;
