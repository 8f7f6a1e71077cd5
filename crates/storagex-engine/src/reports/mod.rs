//! Reporting services
//!
//! All report functions in this module follow the boundary logging pattern:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The repository calls they make log their own lifecycle underneath.

pub mod invoice;
pub mod organization;

pub use invoice::{DailyInvoiceSummary, InvoiceReports, InvoiceSummary};
pub use organization::{OrganizationReports, DEFAULT_MOST_ACTIVE_LIMIT};

fn elapsed_ms(start: std::time::Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
