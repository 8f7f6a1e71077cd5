// Integration tests for invoice reports

mod common;

use chrono::NaiveDate;
use common::setup_test_db;
use storagex_engine::{InvoiceReports, InvoiceSummary};
use storagex_store::{InvoiceItemRepository, InvoiceRepository};

fn reports(db: &common::TestDb) -> InvoiceReports {
    InvoiceReports::new(
        InvoiceRepository::new(db.data_source()).unwrap(),
        InvoiceItemRepository::new(db.data_source()).unwrap(),
    )
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_daily_summary_groups_by_day() {
    // Given: two invoices of organization 1 on 2019-01-15
    let db = setup_test_db();
    let reports = reports(&db);

    // When: summarizing the period that contains them
    let summary = reports
        .daily_summary(date(2018, 12, 1), date(2019, 7, 20))
        .unwrap();

    // Then: one day, 2000 + 1000 + 1200 over 50 units
    let expected = InvoiceSummary {
        amount: 4200,
        volume: 50.0,
    };
    assert_eq!(summary.days.len(), 1);
    assert_eq!(summary.days.get(&date(2019, 1, 15)), Some(&expected));
    assert_eq!(summary.total, expected);
}

#[test]
fn test_daily_summary_spans_days() {
    let db = setup_test_db();
    let reports = reports(&db);

    let summary = reports
        .daily_summary(date(2018, 5, 1), date(2018, 6, 11))
        .unwrap();

    let days: Vec<_> = summary.days.keys().copied().collect();
    assert_eq!(days, vec![date(2018, 5, 1), date(2018, 6, 10)]);
    // 25*100 + (30*40 + 45*30)
    assert_eq!(summary.total.amount, 2500 + 1200 + 1350);
    assert_eq!(summary.total.volume, 170.0);
}

#[test]
fn test_daily_summary_empty_period() {
    let db = setup_test_db();
    let reports = reports(&db);

    let summary = reports
        .daily_summary(date(2000, 1, 1), date(2000, 2, 1))
        .unwrap();
    assert!(summary.days.is_empty());
    assert_eq!(summary.total, InvoiceSummary::default());
}

#[test]
fn test_daily_summary_rounds_credit_halves_up() {
    // Given: a credit invoice whose line amounts land exactly on halves
    let db = setup_test_db();
    db.raw()
        .execute_batch(
            "INSERT INTO invoice (invoice_id, date, organization_id) \
             VALUES ('c1', '2000-01-05 09:00:00+00:00', '1');
             INSERT INTO invoice_item (invoice_item_id, invoice_id, item_id, price, volume) VALUES
                 ('c1-1', 'c1', '1', -3, 2.5),
                 ('c1-2', 'c1', '2', -5, 0.5);",
        )
        .unwrap();
    let reports = reports(&db);

    // When: summarizing that day
    let summary = reports
        .daily_summary(date(2000, 1, 5), date(2000, 1, 6))
        .unwrap();

    // Then: -7.5 rounds to -7 and -2.5 rounds to -2
    assert_eq!(summary.total.amount, -9);
    assert_eq!(summary.total.volume, 3.0);
}

#[test]
fn test_average_price() {
    let db = setup_test_db();
    let reports = reports(&db);

    let average = reports
        .average_price(date(2018, 12, 1), date(2019, 7, 20))
        .unwrap();
    assert_eq!(average, Some(90.0));
}

#[test]
fn test_average_price_without_invoices() {
    let db = setup_test_db();
    let reports = reports(&db);

    let average = reports
        .average_price(date(2000, 1, 1), date(2000, 2, 1))
        .unwrap();
    assert_eq!(average, None);
}

#[test]
fn test_average_price_invoices_without_lines() {
    // Given: an invoice with no lines inside an otherwise empty period
    let db = setup_test_db();
    db.raw()
        .execute(
            "INSERT INTO invoice (invoice_id, date, organization_id) VALUES ('empty', '2000-01-10 00:00:00+00:00', '13')",
            [],
        )
        .unwrap();
    let reports = reports(&db);

    let average = reports
        .average_price(date(2000, 1, 1), date(2000, 2, 1))
        .unwrap();
    assert_eq!(average, None);
}

#[test]
fn test_summary_serializes_days_as_keys() {
    let db = setup_test_db();
    let reports = reports(&db);

    let summary = reports
        .daily_summary(date(2018, 12, 1), date(2019, 7, 20))
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["days"]["2019-01-15"]["amount"], 4200);
    assert_eq!(json["total"]["volume"], 50.0);
}
