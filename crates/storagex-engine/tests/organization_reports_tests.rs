// Integration tests for organization reports

mod common;

use chrono::NaiveDate;
use common::setup_test_db;
use std::collections::HashSet;
use storagex_engine::reports::DEFAULT_MOST_ACTIVE_LIMIT;
use storagex_engine::OrganizationReports;
use storagex_store::OrganizationRepository;

fn reports(db: &common::TestDb) -> (OrganizationReports, OrganizationRepository) {
    let repo = OrganizationRepository::new(db.data_source()).unwrap();
    (OrganizationReports::new(repo.clone()), repo)
}

fn ids(organizations: &[storagex_core::Organization]) -> Vec<&str> {
    organizations.iter().map(|o| o.id.as_str()).collect()
}

#[test]
fn test_most_active_order() {
    // Given: nine organizations with invoice lines, four without
    let db = setup_test_db();
    let (reports, _) = reports(&db);

    // When: ranking with the default limit
    let ranked = reports.most_active(DEFAULT_MOST_ACTIVE_LIMIT).unwrap();

    // Then: only active organizations appear, by descending volume
    assert_eq!(
        ids(&ranked),
        vec!["3", "6", "5", "2", "4", "1", "9", "8", "7"]
    );
}

#[test]
fn test_most_active_respects_limit() {
    let db = setup_test_db();
    let (reports, _) = reports(&db);

    let ranked = reports.most_active(3).unwrap();
    assert_eq!(ids(&ranked), vec!["3", "6", "5"]);
}

#[test]
fn test_items_above_single_threshold() {
    let db = setup_test_db();
    let (reports, _) = reports(&db);

    let found = reports.with_items_above(&[("3", 15.0)]).unwrap();
    assert_eq!(ids(&found), vec!["2", "3"]);
}

#[test]
fn test_items_above_intersects_thresholds() {
    let db = setup_test_db();
    let (reports, _) = reports(&db);

    let found = reports
        .with_items_above(&[("3", 15.0), ("2", 1.0)])
        .unwrap();
    assert_eq!(ids(&found), vec!["2"]);
}

#[test]
fn test_items_above_threshold_is_exclusive() {
    // Organization 4 invoiced exactly 10 of item 3
    let db = setup_test_db();
    let (reports, _) = reports(&db);

    let found = reports.with_items_above(&[("3", 10.0)]).unwrap();
    assert!(!ids(&found).contains(&"4"));
    let found = reports.with_items_above(&[("3", 9.5)]).unwrap();
    assert!(ids(&found).contains(&"4"));
}

#[test]
fn test_items_above_empty_input() {
    let db = setup_test_db();
    let (reports, _) = reports(&db);

    let found = reports.with_items_above::<&str>(&[]).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_organizations_with_items_for_period() {
    // Given: only organization 1 invoiced inside the period
    let db = setup_test_db();
    let (reports, repo) = reports(&db);

    // When: grouping items per organization
    let grouped = reports
        .with_items(
            NaiveDate::from_ymd_opt(2018, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 7, 20).unwrap(),
        )
        .unwrap();

    // Then: every organization is present
    let all: HashSet<_> = repo.find_all().unwrap().into_iter().collect();
    assert_eq!(grouped.keys().cloned().collect::<HashSet<_>>(), all);

    // And: organization 1 has items 1 and 2, the rest none
    for (organization, items) in &grouped {
        let item_ids: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();
        if organization.id == "1" {
            assert_eq!(item_ids, HashSet::from(["1", "2"]));
        } else {
            assert!(item_ids.is_empty(), "organization {}", organization.id);
        }
    }
}
