//! Statement builder
//!
//! Produces positional-parameter SQL from an entity descriptor. Statements
//! that bind entity values return the SQL text together with the parameter
//! vector, both produced from one pass over the columns, so placeholder
//! order and binding order cannot drift apart.

use crate::errors::{MappingError, Result};
use crate::mapping::{EntityDescriptor, Value};

/// SQL text plus the values for its `?` placeholders, in order
#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// `?, ?, ?` with `count` placeholders, for callers building `IN (...)` lists
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `SELECT * FROM <table>`
///
/// # Errors
///
/// `MissingTable` for projection types.
pub fn select_all<T>(descriptor: &EntityDescriptor<T>) -> Result<String> {
    Ok(format!("SELECT * FROM {}", descriptor.require_table()?))
}

/// `SELECT * FROM <table> WHERE <id> = ?`
///
/// # Errors
///
/// `MissingTable` or `NoIdentifier`.
pub fn select_by_id<T>(descriptor: &EntityDescriptor<T>) -> Result<String> {
    let table = descriptor.require_table()?;
    let id = descriptor.require_identifier()?;
    Ok(format!("SELECT * FROM {} WHERE {} = ?", table, id.column()))
}

/// `INSERT INTO <table> (<all columns>) VALUES (<placeholders>)`
///
/// The identifier is included like any other column; its value must already
/// be set on the entity.
///
/// # Errors
///
/// `MissingTable` for projection types.
pub fn insert<T>(descriptor: &EntityDescriptor<T>, entity: &T) -> Result<SqlStatement> {
    let table = descriptor.require_table()?;
    let columns: Vec<&str> = descriptor.columns().collect();
    let params = descriptor
        .fields()
        .iter()
        .map(|field| field.read(entity))
        .collect();

    Ok(SqlStatement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders(columns.len())
        ),
        params,
    })
}

/// `UPDATE <table> SET <col> = ?, ... WHERE <id> = ?`
///
/// Every non-identifier column is assigned; the identifier value is bound
/// last.
///
/// # Errors
///
/// `MissingTable`, `NoIdentifier`, or `NoUpdatableColumns` when the
/// identifier is the only column.
pub fn update<T>(descriptor: &EntityDescriptor<T>, entity: &T) -> Result<SqlStatement> {
    let table = descriptor.require_table()?;
    let id = descriptor.require_identifier()?;

    let mut assignments = Vec::new();
    let mut params = Vec::new();
    for field in descriptor.non_identifier_fields() {
        assignments.push(format!("{} = ?", field.column()));
        params.push(field.read(entity));
    }
    if assignments.is_empty() {
        return Err(MappingError::NoUpdatableColumns {
            record_type: descriptor.record_type(),
        });
    }
    params.push(id.read(entity));

    Ok(SqlStatement {
        sql: format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table,
            assignments.join(", "),
            id.column()
        ),
        params,
    })
}

/// `DELETE FROM <table> WHERE <id> = ?`
///
/// # Errors
///
/// `MissingTable` or `NoIdentifier`.
pub fn delete_by_id<T>(descriptor: &EntityDescriptor<T>) -> Result<String> {
    let table = descriptor.require_table()?;
    let id = descriptor.require_identifier()?;
    Ok(format!("DELETE FROM {} WHERE {} = ?", table, id.column()))
}
