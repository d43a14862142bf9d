//! Cross-component coordination tests: bus, related list, detail panel.

use related_records::{
    DisplayColumn, FieldValue, ObjectInfo, PanelError, RecordId, RelatedListInfo, RelatedListPanel,
    RelatedListRecords, RelatedRecord, Result, SelectedRecordPanel, SelectionBus, SelectionEvent,
};
use related_records::{ObjectMetadataService, RelatedListMetadataService, RelatedListRecordsService};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

// --- Service doubles ---

struct StubMetadata {
    target: String,
    columns: Vec<(&'static str, &'static str)>,
    fail: bool,
}

impl RelatedListMetadataService for StubMetadata {
    fn related_list_info(&self, _parent: &str, list: &str) -> Result<RelatedListInfo> {
        if self.fail {
            return Err(PanelError::MetadataFetch(format!("no metadata for {list}")));
        }
        Ok(RelatedListInfo {
            target_object_api_name: self.target.clone(),
            display_columns: self
                .columns
                .iter()
                .map(|(field, label)| DisplayColumn {
                    field_api_name: field.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        })
    }
}

struct StubRecords {
    records: Vec<RelatedRecord>,
    fail: bool,
}

impl RelatedListRecordsService for StubRecords {
    fn related_list_records(
        &self,
        _parent: &str,
        list: &str,
        _fields: &[String],
    ) -> Result<RelatedListRecords> {
        if self.fail {
            return Err(PanelError::RecordsFetch(format!("no records for {list}")));
        }
        Ok(RelatedListRecords {
            records: self.records.clone(),
        })
    }
}

struct StubObjects {
    icon_urls: HashMap<String, String>,
}

impl ObjectMetadataService for StubObjects {
    fn object_info(&self, object: &str) -> Result<ObjectInfo> {
        Ok(ObjectInfo {
            theme_icon_url: self.icon_urls.get(object).cloned(),
        })
    }
}

fn record(id: &str, fields: &[(&str, Option<&str>, Option<serde_json::Value>)]) -> RelatedRecord {
    RelatedRecord {
        id: RecordId::new(id),
        fields: fields
            .iter()
            .map(|(name, display, value)| {
                (
                    name.to_string(),
                    FieldValue {
                        value: value.clone(),
                        display_value: display.map(str::to_string),
                    },
                )
            })
            .collect(),
    }
}

fn contacts_panel(bus: &Arc<SelectionBus>) -> RelatedListPanel {
    let metadata = Arc::new(StubMetadata {
        target: "Contact".to_string(),
        columns: vec![("Name", "Name"), ("Phone", "Phone")],
        fail: false,
    });
    let records = Arc::new(StubRecords {
        records: vec![
            record(
                "r7",
                &[
                    ("Name", None, Some(json!("Ada Lovelace"))),
                    ("Phone", Some("(555) 0100"), Some(json!("5550100"))),
                ],
            ),
            record("r8", &[("Name", None, Some(json!("Grace Hopper")))]),
        ],
        fail: false,
    });
    let objects = Arc::new(StubObjects {
        icon_urls: HashMap::from([(
            "Contact".to_string(),
            "/assets/icons/standard/contact_60.png".to_string(),
        )]),
    });

    let panel = RelatedListPanel::new(Arc::clone(bus), metadata, records, objects);
    panel.connect();
    panel.set_object_api_name("Account");
    panel.set_record_id("001");
    panel.set_related_list_id("Contacts");
    panel
}

fn detail_panel(bus: &Arc<SelectionBus>) -> SelectedRecordPanel {
    let objects = Arc::new(StubObjects {
        icon_urls: HashMap::from([
            (
                "Contact".to_string(),
                "/assets/icons/standard/contact_60.png".to_string(),
            ),
            (
                "Account".to_string(),
                "/assets/icons/standard/account_60.png".to_string(),
            ),
        ]),
    });
    let panel = SelectedRecordPanel::new(Arc::clone(bus), objects);
    panel.connect();
    panel
}

// --- Related list panel ---

#[test]
fn test_rows_formatted_in_column_order_with_fallback() {
    let bus = Arc::new(SelectionBus::new());
    let panel = contacts_panel(&bus);

    let rows = panel.rows().unwrap();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.id, RecordId::new("r7"));
    let names: Vec<&str> = first.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Name", "Phone"]);
    // Raw value when no display value; display value preferred when present.
    assert_eq!(first.fields[0].display_value.as_deref(), Some("Ada Lovelace"));
    assert_eq!(first.fields[1].display_value.as_deref(), Some("(555) 0100"));

    // Missing field entirely: absent, not an error.
    let second = &rows[1];
    assert_eq!(second.fields[1].display_value, None);
}

#[test]
fn test_list_resolves_target_icon() {
    let bus = Arc::new(SelectionBus::new());
    let panel = contacts_panel(&bus);

    let icon = panel.icon().unwrap();
    assert_eq!(icon.qualified(), "standard:contact");
    assert_eq!(panel.target_object_api_name().as_deref(), Some("Contact"));
}

#[test]
fn test_activation_highlights_own_row() {
    let bus = Arc::new(SelectionBus::new());
    let panel = contacts_panel(&bus);

    panel.activate_row("r7");

    // The panel receives its own published event and highlights the row.
    assert_eq!(panel.highlighted_row(), Some(RecordId::new("r7")));
    assert_eq!(panel.selected_row(), Some(RecordId::new("r7")));
}

#[test]
fn test_foreign_selection_clears_highlight() {
    let bus = Arc::new(SelectionBus::new());
    let panel = contacts_panel(&bus);

    panel.activate_row("r7");
    assert_eq!(panel.highlighted_row(), Some(RecordId::new("r7")));

    // Another list publishes a different record.
    bus.publish(SelectionEvent::new("r9", "Case"));
    assert_eq!(panel.highlighted_row(), None);
    // The local selection is remembered even though the highlight is gone.
    assert_eq!(panel.selected_row(), Some(RecordId::new("r7")));
}

#[test]
fn test_two_lists_track_one_page_selection() {
    let bus = Arc::new(SelectionBus::new());
    let contacts = contacts_panel(&bus);

    let cases = RelatedListPanel::new(
        Arc::clone(&bus),
        Arc::new(StubMetadata {
            target: "Case".to_string(),
            columns: vec![("Subject", "Subject")],
            fail: false,
        }),
        Arc::new(StubRecords {
            records: vec![record("c1", &[("Subject", None, Some(json!("Broken widget")))])],
            fail: false,
        }),
        Arc::new(StubObjects {
            icon_urls: HashMap::new(),
        }),
    );
    cases.connect();
    cases.set_object_api_name("Account");
    cases.set_record_id("001");
    cases.set_related_list_id("Cases");

    contacts.activate_row("r7");
    assert_eq!(contacts.highlighted_row(), Some(RecordId::new("r7")));
    assert_eq!(cases.highlighted_row(), None);

    cases.activate_row("c1");
    assert_eq!(cases.highlighted_row(), Some(RecordId::new("c1")));
    assert_eq!(contacts.highlighted_row(), None);
}

#[test]
fn test_metadata_error_clears_columns_and_rows() {
    let bus = Arc::new(SelectionBus::new());
    let panel = RelatedListPanel::new(
        Arc::clone(&bus),
        Arc::new(StubMetadata {
            target: String::new(),
            columns: vec![],
            fail: true,
        }),
        Arc::new(StubRecords {
            records: vec![],
            fail: false,
        }),
        Arc::new(StubObjects {
            icon_urls: HashMap::new(),
        }),
    );
    panel.set_object_api_name("Account");
    panel.set_related_list_id("Contacts");

    assert!(panel.columns().is_none());
    assert!(panel.rows().is_none());
    assert!(matches!(panel.info_error(), Some(PanelError::MetadataFetch(_))));
}

#[test]
fn test_records_error_clears_rows_keeps_columns() {
    let bus = Arc::new(SelectionBus::new());
    let panel = RelatedListPanel::new(
        Arc::clone(&bus),
        Arc::new(StubMetadata {
            target: "Contact".to_string(),
            columns: vec![("Name", "Name")],
            fail: false,
        }),
        Arc::new(StubRecords {
            records: vec![],
            fail: true,
        }),
        Arc::new(StubObjects {
            icon_urls: HashMap::new(),
        }),
    );
    panel.set_object_api_name("Account");
    panel.set_record_id("001");
    panel.set_related_list_id("Contacts");

    assert!(panel.rows().is_none());
    assert!(panel.columns().is_some());
    assert!(matches!(panel.records_error(), Some(PanelError::RecordsFetch(_))));
}

#[test]
fn test_connect_twice_keeps_single_subscription() {
    let bus = Arc::new(SelectionBus::new());
    let panel = contacts_panel(&bus);

    panel.connect();
    panel.connect();
    // contacts_panel already connected once.
    assert_eq!(bus.subscriber_count(), 1);

    panel.disconnect();
    panel.disconnect();
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn test_drop_releases_subscription() {
    let bus = Arc::new(SelectionBus::new());
    {
        let _panel = contacts_panel(&bus);
        assert_eq!(bus.subscriber_count(), 1);
    }
    assert_eq!(bus.subscriber_count(), 0);

    // A late publish after the panel is gone must not fail.
    bus.publish(SelectionEvent::new("r1", "Contact"));
}

// --- Selected record panel ---

#[test]
fn test_last_selection_wins_with_both_fields_together() {
    let bus = Arc::new(SelectionBus::new());
    let panel = detail_panel(&bus);

    bus.publish(SelectionEvent::new("r1", "Contact"));
    bus.publish(SelectionEvent::new("r2", "Account"));

    assert_eq!(panel.record_id(), Some(RecordId::new("r2")));
    assert_eq!(panel.object_api_name().as_deref(), Some("Account"));
    assert_eq!(panel.title(), "Selected Account Record");
    assert_eq!(panel.icon().unwrap().qualified(), "standard:account");
}

#[test]
fn test_page_context_record_id_alone_is_not_a_selection() {
    let bus = Arc::new(SelectionBus::new());
    let panel = detail_panel(&bus);

    panel.set_record_id("001xx0000001");
    assert!(!panel.has_selected_record());
    assert_eq!(panel.title(), "Selected Record");

    bus.publish(SelectionEvent::new("r1", "Contact"));
    assert!(panel.has_selected_record());
}

#[test]
fn test_remount_completes_on_next_tick() {
    let bus = Arc::new(SelectionBus::new());
    let panel = detail_panel(&bus);
    assert!(panel.detail_form_ready());

    bus.publish(SelectionEvent::new("r1", "Contact"));
    assert!(!panel.detail_form_ready());

    panel.tick();
    assert!(panel.detail_form_ready());

    // Ticks with nothing pending change nothing.
    panel.tick();
    assert!(panel.detail_form_ready());
}

#[test]
fn test_end_to_end_row_activation_updates_detail() {
    let bus = Arc::new(SelectionBus::new());
    let list = contacts_panel(&bus);
    let detail = detail_panel(&bus);

    list.activate_row("r7");

    assert_eq!(detail.record_id(), Some(RecordId::new("r7")));
    assert_eq!(detail.object_api_name().as_deref(), Some("Contact"));
    assert_eq!(detail.title(), "Selected Contact Record");
    assert_eq!(list.highlighted_row(), Some(RecordId::new("r7")));

    detail.tick();
    assert!(detail.detail_form_ready());
}
