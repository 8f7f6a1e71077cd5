// Boundary logging of repository operations

mod common;

use common::setup_test_db;
use storagex_core::logging_facility::init_test_capture;
use storagex_core::model::OrganizationWithItem;
use storagex_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_AFFECTED, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_PARAMS, FIELD_RECORD_TYPE, FIELD_ROWS, FIELD_TABLE,
};
use storagex_store::{ItemRepository, OrganizationRepository};

#[test]
fn test_operations_log_start_and_end() {
    // Given: a capture layer and a seeded database
    let capture = init_test_capture();
    let db = setup_test_db();
    let repo = ItemRepository::new(db.data_source()).unwrap();

    // When: running a successful lookup
    repo.find_all().unwrap();

    // Then: one start and one end event carry the table
    let events: Vec<_> = capture
        .events_for("find_all")
        .into_iter()
        .filter(|e| e.field(FIELD_TABLE) == Some("item"))
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field(FIELD_ROWS), Some("4"));
    assert!(events[1].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_failures_log_end_error_with_code() {
    let capture = init_test_capture();
    let db = setup_test_db();
    let repo = OrganizationRepository::new(db.data_source()).unwrap();

    repo.delete_by_id("1").unwrap_err();

    let errors: Vec<_> = capture
        .events_for("delete_by_id")
        .into_iter()
        .filter(|e| {
            e.event.as_deref() == Some(EVENT_END_ERROR)
                && e.field(FIELD_ERR_CODE) == Some("ERR_STORAGE_ACCESS")
        })
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field(FIELD_ERR_KIND), Some("StorageAccess"));
    assert!(errors[0].field(FIELD_DURATION_MS).is_some());
}

#[test]
fn test_writes_log_affected_rows() {
    // Given: an existing item
    let capture = init_test_capture();
    let db = setup_test_db();
    let repo = ItemRepository::new(db.data_source()).unwrap();
    let mut item = repo.find_by_id("3").unwrap().unwrap();

    // When: updating it
    item.name = "logged-update".to_string();
    assert!(repo.update(&item).unwrap());

    // Then: the end event reports one affected row
    let affected = capture.count_events(|e| {
        e.op.as_deref() == Some("update")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_TABLE) == Some("item")
            && e.field(FIELD_AFFECTED) == Some("1")
    });
    assert!(affected >= 1);

    // And: the statement itself is traced with its parameter count
    let statements = capture.count_events(|e| {
        e.field(FIELD_TABLE) == Some("item")
            && e.field("sql").is_some_and(|sql| sql.starts_with("UPDATE"))
            && e.field(FIELD_PARAMS) == Some("3")
    });
    assert!(statements >= 1);
}

#[test]
fn test_projection_queries_log_record_type() {
    let capture = init_test_capture();
    let db = setup_test_db();
    let repo = OrganizationRepository::new(db.data_source()).unwrap();

    repo.find_all_by_query_as::<OrganizationWithItem>(
        "SELECT o.organization_id AS organization_id, o.name AS organization_name, \
                o.itn AS organization_itn, o.account AS organization_account, \
                NULL AS item_id, NULL AS item_name, NULL AS item_code \
         FROM organization o",
        &[],
    )
    .unwrap();

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("find_all_by_query_as")
            && e.event.as_deref() == Some(EVENT_START)
            && e.field(FIELD_RECORD_TYPE)
                .is_some_and(|t| t.ends_with("OrganizationWithItem"))
    });
    assert!(starts >= 1);
}
