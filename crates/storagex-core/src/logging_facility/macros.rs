//! Boundary events for repository and report operations
//!
//! Every public repository operation and every report emits exactly one
//! `start` event and then either one `end` or one `end_error` event. The
//! macros stamp `component`, `op` and `event`; callers append context such
//! as `table`, `rows` or `affected` after the required arguments.

/// Emit the `start` event of a repository or report operation
///
/// ```
/// # use storagex_core::log_op_start;
/// log_op_start!("find_all");
/// log_op_start!("find_by_id", table = "organization", entity_id = "1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Emit the `end` event of an operation that returned normally
///
/// `duration_ms` is required so that every completed call reports its
/// latency. Result sizes go after it.
///
/// ```
/// # use storagex_core::log_op_end;
/// log_op_end!("find_all", duration_ms = 3, table = "item", rows = 12);
/// log_op_end!("update", duration_ms = 1, affected = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__private::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Emit the `end_error` event of a failed operation
///
/// The error is converted into `ExError` (a `MappingError` works too) and
/// logged as its kind, stable code and message. The error value is
/// consumed, so pass a clone when it is still returned to the caller.
///
/// ```
/// # use storagex_core::log_op_error;
/// # use storagex_core::errors::{ExError, ExErrorKind};
/// let err = ExError::new(ExErrorKind::TooManyResults).with_table("loose");
/// log_op_error!("find_by_id", err, duration_ms = 10, table = "loose");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = ::core::convert::Into::into($err);
        $crate::__private::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::__private::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)*)?
        );
    }};
}
