//! Canonical schema constants for structured logging and events
//!
//! Every lifecycle event emitted by the repository facade and the reporting
//! services uses these keys, so log consumers can rely on them.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Mapping context
pub const FIELD_TABLE: &str = "table";
pub const FIELD_RECORD_TYPE: &str = "record_type";

// Result sizes
pub const FIELD_ROWS: &str = "rows";
pub const FIELD_PARAMS: &str = "params";
pub const FIELD_AFFECTED: &str = "affected";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
