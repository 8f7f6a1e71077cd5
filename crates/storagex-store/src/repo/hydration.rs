//! Hydration layer - builds typed records from result rows
//!
//! Each row becomes a blank record from the descriptor's constructor, then
//! every mapped column is extracted by kind and written through the field's
//! accessor. Columns are looked up by name, so result sets may list them in
//! any order and carry extra columns.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use crate::marshal;
use rusqlite::{Row, Rows};
use storagex_core::errors::ExError;
use storagex_core::mapping::EntityDescriptor;

/// Build one record from the current row
///
/// # Errors
///
/// `StorageAccess` if a mapped column is missing or unreadable,
/// `UnsupportedColumnType` if a value cannot be stored in its field.
pub fn hydrate_row<T>(row: &Row<'_>, descriptor: &EntityDescriptor<T>) -> Result<T> {
    let mut record = descriptor.instantiate();
    for field in descriptor.fields() {
        let value = marshal::extract(field.kind(), row, field.column())?;
        field
            .write(&mut record, value)
            .map_err(ExError::from)?;
    }
    Ok(record)
}

/// Drain `rows` into records
///
/// The first failing row aborts the whole call; no partial result is
/// returned.
///
/// # Errors
///
/// As `hydrate_row`, plus `StorageAccess` if stepping the cursor fails.
pub fn hydrate<T>(rows: &mut Rows<'_>, descriptor: &EntityDescriptor<T>) -> Result<Vec<T>> {
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(from_rusqlite)? {
        records.push(hydrate_row(row, descriptor)?);
    }
    tracing::trace!(
        record_type = descriptor.record_type(),
        rows = records.len(),
        "hydrated rows"
    );
    Ok(records)
}
