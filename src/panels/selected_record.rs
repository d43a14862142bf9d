//! Coordinator for the selected-record detail panel.

use crate::bus::{SelectionBus, Subscription};
use crate::icon::{resolve_icon, IconIdentifier};
use crate::reactive::InputMemo;
use crate::services::ObjectMetadataService;
use crate::types::{RecordId, SelectionEvent};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::warn;

const DEFAULT_TITLE: &str = "Selected Record";

/// Shows the record the user last selected in any related list.
///
/// The record id may arrive from page context before any object type is
/// known, so consumers must check [`has_selected_record`] before rendering
/// detail content.
///
/// [`has_selected_record`]: SelectedRecordPanel::has_selected_record
pub struct SelectedRecordPanel {
    inner: Arc<Mutex<Inner>>,
    bus: Arc<SelectionBus>,
    subscription: Mutex<Option<Subscription>>,
}

struct Inner {
    objects: Arc<dyn ObjectMetadataService>,
    title: String,
    record_id: Option<RecordId>,
    object_api_name: Option<String>,
    icon: Option<IconIdentifier>,
    /// False while a remount of the dependent detail form is pending.
    detail_form_ready: bool,
    remount_pending: bool,
    icon_memo: InputMemo<String>,
}

impl SelectedRecordPanel {
    pub fn new(bus: Arc<SelectionBus>, objects: Arc<dyn ObjectMetadataService>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                objects,
                title: DEFAULT_TITLE.to_string(),
                record_id: None,
                object_api_name: None,
                icon: None,
                detail_form_ready: true,
                remount_pending: false,
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
                inner.lock().apply_selection(event);
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

    /// Set the record id from page context.
    ///
    /// Any record-id change forces a full remount of the dependent detail
    /// form instead of an in-place field update; the form's field layout
    /// otherwise lags one record behind. `detail_form_ready` drops here and
    /// rises again on the next [`tick`](Self::tick).
    pub fn set_record_id(&self, record_id: impl Into<RecordId>) {
        let mut inner = self.inner.lock();
        inner.record_id = Some(record_id.into());
        inner.begin_remount();
    }

    /// Set the object type from page context.
    pub fn set_object_api_name(&self, object_api_name: impl Into<String>) {
        let mut inner = self.inner.lock();
        let object_api_name = object_api_name.into();
        inner.object_api_name = Some(object_api_name.clone());
        inner.refresh_icon(&object_api_name);
    }

    /// Cooperative scheduler tick: completes a pending two-phase remount.
    /// One deferred call is enough; there is nothing to poll.
    pub fn tick(&self) {
        let mut inner = self.inner.lock();
        if inner.remount_pending {
            inner.remount_pending = false;
            inner.detail_form_ready = true;
        }
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.inner.lock().record_id.clone()
    }

    pub fn object_api_name(&self) -> Option<String> {
        self.inner.lock().object_api_name.clone()
    }

    pub fn title(&self) -> String {
        self.inner.lock().title.clone()
    }

    pub fn icon(&self) -> Option<IconIdentifier> {
        self.inner.lock().icon.clone()
    }

    /// Whether both halves of the record identity are known. Page context
    /// populates the record id on its own, so the id alone is not enough.
    pub fn has_selected_record(&self) -> bool {
        let inner = self.inner.lock();
        inner.object_api_name.is_some() && inner.record_id.is_some()
    }

    pub fn detail_form_ready(&self) -> bool {
        self.inner.lock().detail_form_ready
    }
}

impl Drop for SelectedRecordPanel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Inner {
    /// Adopt a broadcast selection: both identity fields replaced together,
    /// never one without the other.
    fn apply_selection(&mut self, event: &SelectionEvent) {
        self.record_id = Some(event.record_id.clone());
        self.object_api_name = Some(event.object_api_name.clone());
        self.title = format!("Selected {} Record", event.object_api_name);
        self.begin_remount();
        let object = event.object_api_name.clone();
        self.refresh_icon(&object);
    }

    fn begin_remount(&mut self) {
        self.detail_form_ready = false;
        self.remount_pending = true;
    }

    fn refresh_icon(&mut self, object_api_name: &str) {
        if !self.icon_memo.changed(object_api_name.to_string()) {
            return;
        }
        match self.objects.object_info(object_api_name) {
            Ok(info) => {
                self.icon = resolve_icon(info.theme_icon_url.as_deref());
            }
            Err(e) => {
                warn!(object = object_api_name, error = %e, "object info fetch failed");
                self.icon = None;
            }
        }
    }
}
