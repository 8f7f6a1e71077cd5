//! Declarative record schemas
//!
//! A record type describes its table, columns and identifier once, in
//! `Record::declare`. The declaration binds a pair of field projections per
//! column; no runtime introspection is involved.
//!
//! ```
//! use storagex_core::mapping::{Record, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct Currency {
//!     code: String,
//!     name: Option<String>,
//! }
//!
//! impl Record for Currency {
//!     fn declare(schema: &mut SchemaBuilder<Self>) {
//!         schema
//!             .table("currency")
//!             .constructor(Self::default)
//!             .id("code", |c| &c.code, |c| &mut c.code)
//!             .column("name", |c| &c.name, |c| &mut c.name);
//!     }
//! }
//! ```

use crate::mapping::descriptor::FieldDescriptor;
use crate::mapping::value::ColumnValue;

/// A type whose instances can be stored in, or hydrated from, table rows
pub trait Record: Sized + 'static {
    /// Declare table, constructor and columns
    fn declare(schema: &mut SchemaBuilder<Self>);
}

type Parts<T> = (
    Option<&'static str>,
    Option<fn() -> T>,
    Vec<FieldDescriptor<T>>,
    Vec<usize>,
);

/// Collects a record's declaration; validated by `EntityDescriptor::derive`
pub struct SchemaBuilder<T> {
    table: Option<&'static str>,
    constructor: Option<fn() -> T>,
    fields: Vec<FieldDescriptor<T>>,
    identifiers: Vec<usize>,
}

impl<T: 'static> SchemaBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            table: None,
            constructor: None,
            fields: Vec::new(),
            identifiers: Vec::new(),
        }
    }

    /// Backing table. Projection types leave it unset.
    pub fn table(&mut self, name: &'static str) -> &mut Self {
        self.table = Some(name);
        self
    }

    /// Zero-argument recipe producing a blank instance for hydration
    pub fn constructor(&mut self, construct: fn() -> T) -> &mut Self {
        self.constructor = Some(construct);
        self
    }

    /// Map a field to a column
    pub fn column<V>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> &mut Self
    where
        V: ColumnValue + 'static,
    {
        self.fields.push(FieldDescriptor::bind(name, get, get_mut));
        self
    }

    /// Map a field to a column and mark it as the row identifier
    pub fn id<V>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> &mut Self
    where
        V: ColumnValue + 'static,
    {
        self.identifiers.push(self.fields.len());
        self.column(name, get, get_mut)
    }

    pub(crate) fn into_parts(self) -> Parts<T> {
        (self.table, self.constructor, self.fields, self.identifiers)
    }
}
