//! Record types of the invoicing schema
//!
//! Four table-backed entities plus one read-only projection used by the
//! organization reports.

pub mod invoice;
pub mod invoice_item;
pub mod item;
pub mod organization;
pub mod organization_with_item;

pub use invoice::Invoice;
pub use invoice_item::InvoiceItem;
pub use item::Item;
pub use organization::Organization;
pub use organization_with_item::OrganizationWithItem;
