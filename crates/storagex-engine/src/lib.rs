//! StorageX Engine - reporting layer
//!
//! Aggregate queries over the invoicing schema, built on the generic
//! repository's query primitives.

pub mod reports;

pub use reports::{DailyInvoiceSummary, InvoiceReports, InvoiceSummary, OrganizationReports};
