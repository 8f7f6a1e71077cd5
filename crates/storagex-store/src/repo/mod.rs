//! Repository layer mapping records to SQLite tables
//!
//! `Repository<T>` runs generated and caller-supplied SQL for any record
//! type; `hydration` turns result rows back into records.

pub mod hydration;
pub mod repository;

pub use repository::{
    InvoiceItemRepository, InvoiceRepository, ItemRepository, OrganizationRepository, Repository,
};
