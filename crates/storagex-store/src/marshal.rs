//! Value marshalling registry
//!
//! Moves `Value`s between records and SQLite: `extract` reads one named
//! result column as a given kind, `bind` sets one positional parameter.
//! Both dispatch over the closed `ValueKind`/`Value` enums, so the set of
//! supported kinds is fixed at compile time.
//!
//! Storage encodings follow rusqlite's: instants and dates are TEXT
//! (`YYYY-MM-DD HH:MM:SS.f+00:00`, `YYYY-MM-DD`), which keeps them
//! comparable to each other in range filters.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Null;
use rusqlite::{Row, Statement};
use storagex_core::errors::{ExError, MappingError};
use storagex_core::mapping::{Value, ValueKind};

/// Read column `column` of `row` as `kind`
///
/// SQL NULL yields `Value::Null` for every kind; whether the target field
/// accepts it is decided when the value is written into the record.
///
/// # Errors
///
/// `StorageAccess` when the column is absent or holds something the kind's
/// decoder cannot read (e.g. TEXT for an integer column).
pub fn extract(kind: ValueKind, row: &Row<'_>, column: &str) -> Result<Value> {
    let value = match kind {
        ValueKind::Text => row
            .get::<_, Option<String>>(column)
            .map(|v| v.map_or(Value::Null, Value::Text)),
        ValueKind::Instant => row
            .get::<_, Option<DateTime<Utc>>>(column)
            .map(|v| v.map_or(Value::Null, Value::Instant)),
        ValueKind::Integer => row
            .get::<_, Option<i32>>(column)
            .map(|v| v.map_or(Value::Null, Value::Integer)),
        ValueKind::Double | ValueKind::BoxedDouble => row
            .get::<_, Option<f64>>(column)
            .map(|v| v.map_or(Value::Null, Value::Double)),
        ValueKind::Date => row
            .get::<_, Option<NaiveDate>>(column)
            .map(|v| v.map_or(Value::Null, Value::Date)),
    };

    value.map_err(|e| from_rusqlite(e).with_column(column))
}

/// Bind `value` to the 1-based parameter `index`
///
/// # Errors
///
/// `StorageAccess` if the statement has no such parameter.
pub fn bind(stmt: &mut Statement<'_>, index: usize, value: &Value) -> Result<()> {
    let bound = match value {
        Value::Null => stmt.raw_bind_parameter(index, Null),
        Value::Text(text) => stmt.raw_bind_parameter(index, text),
        Value::Instant(ts) => stmt.raw_bind_parameter(index, ts),
        Value::Integer(i) => stmt.raw_bind_parameter(index, i),
        Value::Double(d) => stmt.raw_bind_parameter(index, d),
        Value::Date(date) => stmt.raw_bind_parameter(index, date),
    };
    bound.map_err(from_rusqlite)
}

/// Bind `value` as a parameter compared against a column of `kind`
///
/// # Errors
///
/// `UnsupportedParameterType` if the value's kind does not match `kind`,
/// otherwise as `bind`.
pub fn bind_as(
    kind: ValueKind,
    column: &str,
    stmt: &mut Statement<'_>,
    index: usize,
    value: &Value,
) -> Result<()> {
    if !kind.admits(value) {
        return Err(ExError::from(MappingError::ParameterKindMismatch {
            index,
            column: column.to_string(),
            expected: kind,
            actual: value.kind_name(),
        }));
    }
    bind(stmt, index, value)
}

/// Bind every value in order, after checking the count against the
/// statement's placeholders
///
/// # Errors
///
/// `StorageAccess` if the counts differ or a bind fails.
pub fn bind_all(stmt: &mut Statement<'_>, params: &[Value]) -> Result<()> {
    let expected = stmt.parameter_count();
    if params.len() != expected {
        return Err(from_rusqlite(rusqlite::Error::InvalidParameterCount(
            params.len(),
            expected,
        )));
    }
    for (i, value) in params.iter().enumerate() {
        bind(stmt, i + 1, value)?;
    }
    Ok(())
}
