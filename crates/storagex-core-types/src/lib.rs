//! Core types shared across StorageX facilities
//!
//! This crate provides foundational types used by the error, logging and
//! connection configuration layers:
//!
//! - **Schema constants**: Canonical field keys and event names for structured logs
//! - **Sensitive data**: `Sensitive<T>` marker for credentials that must never be logged

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
