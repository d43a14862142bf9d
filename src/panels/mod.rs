//! Panel coordinators for the record-detail page.
//!
//! Three thin coordinators wire the collaborator services into view state:
//! - [`AllRelatedListsPanel`]: the related lists available on an object,
//!   minus a fixed set of unsupported ones.
//! - [`RelatedListPanel`]: one related list with row formatting, selection
//!   publish, and highlight tracking.
//! - [`SelectedRecordPanel`]: the record the user last selected anywhere on
//!   the page.
//!
//! The latter two subscribe to the [`SelectionBus`](crate::SelectionBus) on
//! `connect` and release the subscription unconditionally on `disconnect`
//! and on drop.

mod all_lists;
mod related_list;
mod selected_record;

pub use all_lists::{AllRelatedListsPanel, UNSUPPORTED_RELATED_LISTS};
pub use related_list::RelatedListPanel;
pub use selected_record::SelectedRecordPanel;
