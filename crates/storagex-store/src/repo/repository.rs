//! Generic repository facade
//!
//! One `Repository<T>` serves every table-backed record type. Statements
//! are generated from the record's descriptor (or supplied by the caller),
//! bound through the marshalling registry and hydrated back into records.
//!
//! Each call opens one connection from the factory, runs one statement and
//! drops both before returning, on success and on error alike. Nothing is
//! retained between calls, so a repository is cheap to clone and share
//! across threads.
//!
//! Every public operation owns its lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

#![allow(clippy::result_large_err)]

use crate::db::ConnectionFactory;
use crate::errors::{from_rusqlite, too_many_results, Result};
use crate::marshal;
use crate::repo::hydration;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Instant;
use storagex_core::errors::ExError;
use storagex_core::mapping::{EntityDescriptor, MetadataCache, Record, Value};
use storagex_core::model::{Invoice, InvoiceItem, Item, Organization};
use storagex_core::{log_op_end, log_op_error, log_op_start, sql};

pub type OrganizationRepository = Repository<Organization>;
pub type ItemRepository = Repository<Item>;
pub type InvoiceRepository = Repository<Invoice>;
pub type InvoiceItemRepository = Repository<InvoiceItem>;

#[derive(Clone)]
enum CacheHandle {
    Global,
    Owned(Arc<MetadataCache>),
}

impl CacheHandle {
    fn get(&self) -> &MetadataCache {
        match self {
            CacheHandle::Global => MetadataCache::global(),
            CacheHandle::Owned(cache) => cache.as_ref(),
        }
    }
}

/// Table-backed CRUD and query access for record type `T`
pub struct Repository<T> {
    factory: Arc<dyn ConnectionFactory>,
    cache: CacheHandle,
    descriptor: Arc<EntityDescriptor<T>>,
    table: &'static str,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            cache: self.cache.clone(),
            descriptor: self.descriptor.clone(),
            table: self.table,
        }
    }
}

impl<T> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("record_type", &self.descriptor.record_type())
            .field("table", &self.table)
            .finish()
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl<T: Record> Repository<T> {
    /// Repository using the process-wide metadata cache
    ///
    /// # Errors
    ///
    /// Any configuration error in `T`'s schema, including
    /// `MissingTableMetadata` when `T` declares no table.
    pub fn new(factory: impl ConnectionFactory + 'static) -> Result<Self> {
        Self::build(Arc::new(factory), CacheHandle::Global)
    }

    /// Repository using its own metadata cache
    ///
    /// # Errors
    ///
    /// Same as `new`.
    pub fn with_cache(
        factory: impl ConnectionFactory + 'static,
        cache: Arc<MetadataCache>,
    ) -> Result<Self> {
        Self::build(Arc::new(factory), CacheHandle::Owned(cache))
    }

    /// Repository for another record type sharing this one's factory and cache
    ///
    /// # Errors
    ///
    /// Same as `new`, for `U`.
    pub fn sibling<U: Record>(&self) -> Result<Repository<U>> {
        Repository::build(self.factory.clone(), self.cache.clone())
    }

    fn build(factory: Arc<dyn ConnectionFactory>, cache: CacheHandle) -> Result<Self> {
        let descriptor = cache.get().resolve::<T>()?;
        let table = descriptor.require_table()?;
        Ok(Self {
            factory,
            cache,
            descriptor,
            table,
        })
    }

    /// Run a caller-supplied query and hydrate every row as `T`
    ///
    /// Parameters bind to `?` placeholders in order.
    ///
    /// # Errors
    ///
    /// `StorageAccess` for driver failures (including a parameter count
    /// that does not match the placeholders), `UnsupportedColumnType` when
    /// a column value does not fit its field.
    pub fn find_all_by_query(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        const OP: &str = "find_all_by_query";
        log_op_start!(OP, table = self.table);
        let start = Instant::now();

        let records = self
            .query(&self.descriptor, sql, params)
            .map_err(|e| self.failed(OP, e, start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            rows = records.len()
        );
        Ok(records)
    }

    /// Run a caller-supplied query and hydrate every row as projection `K`
    ///
    /// `K` needs no table; its descriptor comes from the same cache as `T`'s.
    ///
    /// # Errors
    ///
    /// As `find_all_by_query`, plus any configuration error in `K`'s schema.
    pub fn find_all_by_query_as<K: Record>(&self, sql: &str, params: &[Value]) -> Result<Vec<K>> {
        const OP: &str = "find_all_by_query_as";
        log_op_start!(OP, table = self.table, record_type = std::any::type_name::<K>());
        let start = Instant::now();

        let records = self
            .cache
            .get()
            .resolve::<K>()
            .map_err(ExError::from)
            .and_then(|descriptor| self.query(&descriptor, sql, params))
            .map_err(|e| self.failed(OP, e, start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            rows = records.len()
        );
        Ok(records)
    }

    /// Every row of the table, in store order
    ///
    /// # Errors
    ///
    /// As `find_all_by_query`.
    pub fn find_all(&self) -> Result<Vec<T>> {
        const OP: &str = "find_all";
        log_op_start!(OP, table = self.table);
        let start = Instant::now();

        let records = sql::select_all(&self.descriptor)
            .map_err(ExError::from)
            .and_then(|sql| self.query(&self.descriptor, &sql, &[]))
            .map_err(|e| self.failed(OP, e, start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            rows = records.len()
        );
        Ok(records)
    }

    /// The record whose identifier equals `id`, if any
    ///
    /// # Errors
    ///
    /// - `NoIdentifierColumn` if `T` declares no identifier
    /// - `UnsupportedParameterType` if `id` is not of the identifier's kind
    /// - `TooManyResults` if more than one row matches
    /// - `StorageAccess` for driver failures
    pub fn find_by_id(&self, id: impl Into<Value>) -> Result<Option<T>> {
        const OP: &str = "find_by_id";
        let id = id.into();
        log_op_start!(OP, table = self.table, entity_id = %id);
        let start = Instant::now();

        let found = self
            .find_by_id_impl(&id)
            .map_err(|e| self.failed(OP, e.with_entity_id(id.to_string()), start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            found = found.is_some()
        );
        Ok(found)
    }

    fn find_by_id_impl(&self, id: &Value) -> Result<Option<T>> {
        let identifier = self.descriptor.require_identifier()?;
        let sql = sql::select_by_id(&self.descriptor)?;

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        marshal::bind_as(identifier.kind(), identifier.column(), &mut stmt, 1, id)?;
        let mut rows = stmt.raw_query();
        let mut records = hydration::hydrate(&mut rows, &self.descriptor)?;

        match records.len() {
            0 | 1 => Ok(records.pop()),
            n => Err(too_many_results(self.table, &id.to_string(), n)),
        }
    }

    /// Overwrite every non-identifier column of the row matching the
    /// entity's identifier
    ///
    /// Returns `false` when no row has that identifier.
    ///
    /// # Errors
    ///
    /// `NoIdentifierColumn`, `EmptyMapping` when the identifier is the only
    /// column, or `StorageAccess`.
    pub fn update(&self, entity: &T) -> Result<bool> {
        const OP: &str = "update";
        log_op_start!(OP, table = self.table);
        let start = Instant::now();

        let affected = sql::update(&self.descriptor, entity)
            .map_err(ExError::from)
            .and_then(|stmt| self.execute(&stmt.sql, &stmt.params))
            .map_err(|e| self.failed(OP, e, start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            affected = affected
        );
        Ok(affected > 0)
    }

    /// Insert the entity as a new row, identifier included
    ///
    /// # Errors
    ///
    /// `StorageAccess`, e.g. for a duplicate identifier or a broken
    /// foreign key.
    pub fn create(&self, entity: &T) -> Result<bool> {
        const OP: &str = "create";
        log_op_start!(OP, table = self.table);
        let start = Instant::now();

        let affected = sql::insert(&self.descriptor, entity)
            .map_err(ExError::from)
            .and_then(|stmt| self.execute(&stmt.sql, &stmt.params))
            .map_err(|e| self.failed(OP, e, start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            affected = affected
        );
        Ok(affected > 0)
    }

    /// Delete the row whose identifier equals `id`
    ///
    /// Returns `false` when no row has that identifier.
    ///
    /// # Errors
    ///
    /// `NoIdentifierColumn`, `UnsupportedParameterType`, or
    /// `StorageAccess` (including rows still referenced by other tables).
    pub fn delete_by_id(&self, id: impl Into<Value>) -> Result<bool> {
        const OP: &str = "delete_by_id";
        let id = id.into();
        log_op_start!(OP, table = self.table, entity_id = %id);
        let start = Instant::now();

        let affected = self
            .delete_by_id_impl(&id)
            .map_err(|e| self.failed(OP, e.with_entity_id(id.to_string()), start))?;

        log_op_end!(
            OP,
            duration_ms = elapsed_ms(start),
            table = self.table,
            affected = affected
        );
        Ok(affected > 0)
    }

    fn delete_by_id_impl(&self, id: &Value) -> Result<usize> {
        let identifier = self.descriptor.require_identifier()?;
        let sql = sql::delete_by_id(&self.descriptor)?;

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
        marshal::bind_as(identifier.kind(), identifier.column(), &mut stmt, 1, id)?;
        let affected = stmt.raw_execute().map_err(from_rusqlite)?;
        Ok(affected)
    }
}

impl<T> Repository<T> {
    pub fn descriptor(&self) -> &EntityDescriptor<T> {
        &self.descriptor
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    fn connect(&self) -> Result<Connection> {
        self.factory.connect()
    }

    fn query<K>(&self, descriptor: &EntityDescriptor<K>, sql: &str, params: &[Value]) -> Result<Vec<K>> {
        tracing::debug!(table = self.table, sql, params = params.len(), "query");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        marshal::bind_all(&mut stmt, params)?;
        let mut rows = stmt.raw_query();
        let records = hydration::hydrate(&mut rows, descriptor)?;
        Ok(records)
    }

    fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        tracing::debug!(table = self.table, sql, params = params.len(), "execute");
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
        marshal::bind_all(&mut stmt, params)?;
        let affected = stmt.raw_execute().map_err(from_rusqlite)?;
        Ok(affected)
    }

    fn failed(&self, op: &'static str, err: ExError, start: Instant) -> ExError {
        let err = err.with_op(op).with_table(self.table);
        log_op_error!(
            op,
            err.clone(),
            duration_ms = elapsed_ms(start),
            table = self.table
        );
        err
    }
}
