// Integration tests for schema declarations and descriptor derivation

use storagex_core::mapping::{EntityDescriptor, MetadataCache, Record, SchemaBuilder, ValueKind};
use storagex_core::model::{Invoice, InvoiceItem, Item, Organization, OrganizationWithItem};
use storagex_core::{ExError, ExErrorKind, MappingError};

#[test]
fn test_invoicing_records_derive() {
    // Given: the four table-backed records
    let organization = EntityDescriptor::<Organization>::derive().unwrap();
    let item = EntityDescriptor::<Item>::derive().unwrap();
    let invoice = EntityDescriptor::<Invoice>::derive().unwrap();
    let line = EntityDescriptor::<InvoiceItem>::derive().unwrap();

    // Then: tables and identifiers match the schema
    assert_eq!(organization.table(), Some("organization"));
    assert_eq!(
        organization.identifier().map(|f| f.column()),
        Some("organization_id")
    );
    assert_eq!(item.identifier().map(|f| f.column()), Some("item_id"));
    assert_eq!(invoice.identifier().map(|f| f.column()), Some("invoice_id"));
    assert_eq!(line.identifier().map(|f| f.column()), Some("invoice_item_id"));

    // And: kinds follow the field types
    assert_eq!(invoice.field("date").unwrap().kind(), ValueKind::Instant);
    assert_eq!(line.field("price").unwrap().kind(), ValueKind::Integer);
    assert_eq!(line.field("volume").unwrap().kind(), ValueKind::Double);
    assert!(item.field("code").unwrap().nullable());
    assert!(!item.field("name").unwrap().nullable());
}

#[test]
fn test_projection_derives_without_table_or_identifier() {
    let projection = EntityDescriptor::<OrganizationWithItem>::derive().unwrap();
    assert_eq!(projection.table(), None);
    assert!(projection.identifier().is_none());
    assert_eq!(projection.fields().len(), 7);

    let err: ExError = projection.require_table().unwrap_err().into();
    assert_eq!(err.kind(), ExErrorKind::MissingTableMetadata);
}

#[derive(Default)]
struct TwoIds {
    a: String,
    b: String,
}

impl Record for TwoIds {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .table("two_ids")
            .constructor(Self::default)
            .id("a", |r| &r.a, |r| &mut r.a)
            .id("b", |r| &r.b, |r| &mut r.b);
    }
}

#[derive(Default)]
struct SameColumnTwice {
    a: String,
    b: String,
}

impl Record for SameColumnTwice {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema
            .table("same")
            .constructor(Self::default)
            .column("value", |r| &r.a, |r| &mut r.a)
            .column("VALUE", |r| &r.b, |r| &mut r.b);
    }
}

struct NoColumns;

impl Record for NoColumns {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema.table("nothing").constructor(|| NoColumns);
    }
}

#[derive(Default)]
struct NoConstructor {
    a: i32,
}

impl Record for NoConstructor {
    fn declare(schema: &mut SchemaBuilder<Self>) {
        schema.table("no_ctor").column("a", |r| &r.a, |r| &mut r.a);
    }
}

#[test]
fn test_second_identifier_is_a_configuration_error() {
    let err = EntityDescriptor::<TwoIds>::derive().unwrap_err();
    assert!(matches!(
        err,
        MappingError::DuplicateIdentifier {
            first: "a",
            second: "b",
            ..
        }
    ));
    assert!(ExError::from(err).is_configuration());
}

#[test]
fn test_duplicate_column_rejected_case_insensitively() {
    let err = EntityDescriptor::<SameColumnTwice>::derive().unwrap_err();
    assert!(matches!(
        err,
        MappingError::DuplicateColumn {
            column: "VALUE",
            ..
        }
    ));
}

#[test]
fn test_empty_mapping_rejected() {
    let err = EntityDescriptor::<NoColumns>::derive().unwrap_err();
    assert_eq!(ExError::from(err).kind(), ExErrorKind::EmptyMapping);
}

#[test]
fn test_missing_constructor_rejected() {
    let err = EntityDescriptor::<NoConstructor>::derive().unwrap_err();
    assert_eq!(ExError::from(err).kind(), ExErrorKind::NoDefaultConstructor);
}

#[test]
fn test_cache_shares_descriptors_between_lookups() {
    let cache = MetadataCache::new();
    let first = cache.resolve::<OrganizationWithItem>().unwrap();
    let second = cache.resolve::<OrganizationWithItem>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(cache.contains::<OrganizationWithItem>());
    assert!(!cache.contains::<Organization>());
}

#[test]
fn test_global_cache_is_a_singleton() {
    let a = MetadataCache::global().resolve::<Item>().unwrap();
    let b = MetadataCache::global().resolve::<Item>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
