//! StorageX Core - metadata-driven mapping engine
//!
//! This crate provides the storage-independent half of StorageX:
//! - Error facility (`ExError`, `ExErrorKind`) and mapping errors
//! - Structured logging facility (profiles, lifecycle macros, test capture)
//! - Record schema declarations, derived entity descriptors and their cache
//! - The closed set of value kinds used for marshalling
//! - SQL statement building from descriptors
//! - Record types of the invoicing schema

pub mod errors;
pub mod logging_facility;
pub mod mapping;
pub mod model;
pub mod sql;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, MappingError, Result};
pub use mapping::{
    ColumnValue, EntityDescriptor, FieldDescriptor, MetadataCache, Record, SchemaBuilder, Value,
    ValueKind,
};
pub use model::{Invoice, InvoiceItem, Item, Organization, OrganizationWithItem};
pub use sql::SqlStatement;

#[doc(hidden)]
pub mod __private {
    pub use storagex_core_types::schema;
    pub use tracing;
}
