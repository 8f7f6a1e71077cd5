//! Structured logging facility for StorageX
//!
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Boundary ownership
//!
//! The repository facade and the reporting services own lifecycle events:
//! one start and one end (or end_error) per public operation. Metadata
//! derivation, statement building, marshalling and hydration only emit
//! `tracing::debug!`/`trace!` details.
//!
//! ```rust
//! use storagex_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
