//! Coordinator for one related list.

use crate::bus::{SelectionBus, Subscription};
use crate::error::PanelError;
use crate::icon::{resolve_icon, IconIdentifier};
use crate::reactive::InputMemo;
use crate::services::{ObjectMetadataService, RelatedListMetadataService, RelatedListRecordsService};
use crate::types::{
    DisplayColumn, RecordId, RelatedListRecords, RowField, RowViewState, SelectionEvent,
};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// One related list's rows, selection, and highlight state.
///
/// Context inputs (`object_api_name`, `record_id`, `related_list_id`) come
/// from the embedding page; each setter re-runs the dependent fetches only
/// when its input tuple actually changed. Activating a row publishes a
/// [`SelectionEvent`]; receiving one back decides the highlight: an id
/// matching the locally tracked selection highlights exactly that row, any
/// other id clears this list's highlight entirely (the selection lives in
/// another list now).
pub struct RelatedListPanel {
    inner: Arc<Mutex<Inner>>,
    bus: Arc<SelectionBus>,
    subscription: Mutex<Option<Subscription>>,
}

struct Inner {
    metadata: Arc<dyn RelatedListMetadataService>,
    records: Arc<dyn RelatedListRecordsService>,
    objects: Arc<dyn ObjectMetadataService>,

    // Context from the embedding page.
    object_api_name: Option<String>,
    record_id: Option<RecordId>,
    related_list_id: Option<String>,

    // Derived from metadata.
    target_object_api_name: Option<String>,
    columns: Option<Vec<DisplayColumn>>,
    field_api_names: Vec<String>,
    icon: Option<IconIdentifier>,

    // Derived from records.
    rows: Option<Vec<RowViewState>>,

    info_error: Option<PanelError>,
    records_error: Option<PanelError>,

    selected_row: Option<RecordId>,
    highlighted_row: Option<RecordId>,

    info_memo: InputMemo<(String, String)>,
    records_memo: InputMemo<(RecordId, String, Vec<String>)>,
    icon_memo: InputMemo<String>,
}

impl RelatedListPanel {
    pub fn new(
        bus: Arc<SelectionBus>,
        metadata: Arc<dyn RelatedListMetadataService>,
        records: Arc<dyn RelatedListRecordsService>,
        objects: Arc<dyn ObjectMetadataService>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                metadata,
                records,
                objects,
                object_api_name: None,
                record_id: None,
                related_list_id: None,
                target_object_api_name: None,
                columns: None,
                field_api_names: Vec::new(),
                icon: None,
                rows: None,
                info_error: None,
                records_error: None,
                selected_row: None,
                highlighted_row: None,
                info_memo: InputMemo::new(),
                records_memo: InputMemo::new(),
                icon_memo: InputMemo::new(),
            })),
            bus,
            subscription: Mutex::new(None),
        }
    }

    /// Subscribe to the selection bus. A no-op while already subscribed.
    pub fn connect(&self) {
        let mut subscription = self.subscription.lock();
        if subscription.is_some() {
            return;
        }
        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        *subscription = Some(self.bus.subscribe(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.lock().handle_selection(event);
            }
        }));
    }

    /// Release the subscription. Safe to call at any point, any number of
    /// times, including after a partial initialization.
    pub fn disconnect(&self) {
        if let Some(subscription) = self.subscription.lock().take() {
            self.bus.unsubscribe(subscription);
        }
    }

    pub fn set_object_api_name(&self, object_api_name: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.object_api_name = Some(object_api_name.into());
        inner.sync_fetches();
    }

    pub fn set_record_id(&self, record_id: impl Into<RecordId>) {
        let mut inner = self.inner.lock();
        inner.record_id = Some(record_id.into());
        inner.sync_fetches();
    }

    pub fn set_related_list_id(&self, related_list_id: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.related_list_id = Some(related_list_id.into());
        inner.sync_fetches();
    }

    /// A row was activated by the user: track it as the current selection
    /// and broadcast it.
    pub fn activate_row(&self, row_id: impl Into<RecordId>) {
        let row_id = row_id.into();
        // Build the event outside the publish so the inner lock is released
        // before subscribers (including this panel) run.
        let event = {
            let mut inner = self.inner.lock();
            inner.selected_row = Some(row_id.clone());
            inner
                .target_object_api_name
                .clone()
                .map(|object| SelectionEvent::new(row_id.clone(), object))
        };
        match event {
            Some(event) => {
                debug!(record = %event.record_id, object = %event.object_api_name, "publishing selection");
                self.bus.publish(event);
            }
            None => {
                warn!(record = %row_id, "row activated before target object type resolved; not publishing");
            }
        }
    }

    pub fn rows(&self) -> Option<Vec<RowViewState>> {
        self.inner.lock().rows.clone()
    }

    pub fn columns(&self) -> Option<Vec<DisplayColumn>> {
        self.inner.lock().columns.clone()
    }

    pub fn target_object_api_name(&self) -> Option<String> {
        self.inner.lock().target_object_api_name.clone()
    }

    pub fn icon(&self) -> Option<IconIdentifier> {
        self.inner.lock().icon.clone()
    }

    pub fn selected_row(&self) -> Option<RecordId> {
        self.inner.lock().selected_row.clone()
    }

    /// The row currently marked selected in this list's view, if the
    /// page-wide selection points at one of ours.
    pub fn highlighted_row(&self) -> Option<RecordId> {
        self.inner.lock().highlighted_row.clone()
    }

    pub fn info_error(&self) -> Option<PanelError> {
        self.inner.lock().info_error.clone()
    }

    pub fn records_error(&self) -> Option<PanelError> {
        self.inner.lock().records_error.clone()
    }
}

impl Drop for RelatedListPanel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Inner {
    /// Re-run whichever fetches have all their inputs and saw them change.
    fn sync_fetches(&mut self) {
        if let (Some(object), Some(list)) = (
            self.object_api_name.clone(),
            self.related_list_id.clone(),
        ) {
            if self.info_memo.changed((object.clone(), list.clone())) {
                self.fetch_info(&object, &list);
            }
        }

        if let (Some(record), Some(list)) = (self.record_id.clone(), self.related_list_id.clone())
        {
            if !self.field_api_names.is_empty()
                && self
                    .records_memo
                    .changed((record.clone(), list.clone(), self.field_api_names.clone()))
            {
                self.fetch_records(&record, &list);
            }
        }

        if let Some(target) = self.target_object_api_name.clone() {
            if self.icon_memo.changed(target.clone()) {
                self.fetch_icon(&target);
            }
        }
    }

    fn fetch_info(&mut self, object: &str, list: &str) {
        match self.metadata.related_list_info(object, list) {
            Ok(info) => {
                self.info_error = None;
                self.field_api_names = info
                    .display_columns
                    .iter()
                    .map(|dc| format!("{}.{}", info.target_object_api_name, dc.field_api_name))
                    .collect();
                self.target_object_api_name = Some(info.target_object_api_name);
                self.columns = Some(info.display_columns);
                self.rows = None;
            }
            Err(e) => {
                warn!(list, error = %e, "related list info fetch failed");
                self.info_error = Some(e);
                self.columns = None;
                self.rows = None;
                self.field_api_names.clear();
            }
        }
    }

    fn fetch_records(&mut self, record: &RecordId, list: &str) {
        match self
            .records
            .related_list_records(record.as_str(), list, &self.field_api_names)
        {
            Ok(records) => {
                self.records_error = None;
                self.rows = Some(self.format_rows(records));
            }
            Err(e) => {
                warn!(list, error = %e, "related list records fetch failed");
                self.rows = None;
                self.records_error = Some(e);
            }
        }
    }

    fn fetch_icon(&mut self, target: &str) {
        match self.objects.object_info(target) {
            Ok(info) => {
                self.icon = resolve_icon(info.theme_icon_url.as_deref());
            }
            Err(e) => {
                warn!(object = target, error = %e, "object info fetch failed");
                self.icon = None;
            }
        }
    }

    /// Flatten each record's field map into view rows, fields in
    /// display-column order, three-way display fallback per field.
    fn format_rows(&self, records: RelatedListRecords) -> Vec<RowViewState> {
        let columns = self.columns.as_deref().unwrap_or(&[]);
        records
            .records
            .into_iter()
            .map(|record| RowViewState {
                fields: columns
                    .iter()
                    .map(|column| RowField {
                        name: column.field_api_name.clone(),
                        display_value: record
                            .fields
                            .get(&column.field_api_name)
                            .and_then(|field| field.display()),
                    })
                    .collect(),
                id: record.id,
            })
            .collect()
    }

    fn handle_selection(&mut self, event: &SelectionEvent) {
        if self.selected_row.as_ref() == Some(&event.record_id) {
            self.highlighted_row = self.selected_row.clone();
        } else {
            // The selection belongs elsewhere, possibly to another list.
            self.highlighted_row = None;
        }
    }
}
