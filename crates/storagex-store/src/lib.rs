//! StorageX Store - SQLite side of the mapping engine
//!
//! Provides:
//! - Connection configuration (`DataSource`) behind the `ConnectionFactory` seam
//! - Value marshalling between `Value` and SQLite parameters/columns
//! - Result hydration into typed records
//! - The generic `Repository<T>` facade and its typed aliases

pub mod db;
pub mod errors;
pub mod marshal;
pub mod repo;

// Re-export key types
pub use db::{ConnectionFactory, DataSource};
pub use errors::Result;
pub use repo::{
    InvoiceItemRepository, InvoiceRepository, ItemRepository, OrganizationRepository, Repository,
};
