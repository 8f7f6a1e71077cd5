//! Metadata-driven mapping between record types and tables
//!
//! - `value`: closed set of value kinds and the `Value` carrier
//! - `schema`: the `Record` declaration surface
//! - `descriptor`: derived, validated per-type metadata with accessor tables
//! - `cache`: lazily populated, type-keyed descriptor cache

pub mod cache;
pub mod descriptor;
pub mod schema;
pub mod value;

pub use cache::MetadataCache;
pub use descriptor::{EntityDescriptor, FieldDescriptor};
pub use schema::{Record, SchemaBuilder};
pub use value::{ColumnValue, Value, ValueKind};
