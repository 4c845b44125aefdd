//! Canonical logging macros
//!
//! Every event carries `component`, `op` and `event`; callers add
//! domain fields such as `kind` or `error_count`. End events take the
//! `Instant` the operation started at and derive `duration_ms` from it.

/// Log the start of an operation
///
/// ```
/// # use storval_core::log_op_start;
/// log_op_start!("validate_create");
/// log_op_start!("validate_create", kind = "CSINode");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = storval_core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use storval_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("validate_create", started);
/// log_op_end!("validate_create", started, error_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $started:expr $(, $($field:tt)+)?) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = storval_core_types::schema::EVENT_END,
            duration_ms = $started.elapsed().as_millis() as u64,
            $($($field)+)?
        )
    };
}

/// Log an operational failure with its stable code
///
/// ```
/// # use storval_core::{log_op_error, errors::StorvalError};
/// let started = std::time::Instant::now();
/// let err = StorvalError::UnknownKind { kind: "Pod".to_string() };
/// log_op_error!("decode", started, err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $started:expr, $err:expr $(, $($field:tt)+)?) => {{
        let storval_err: &$crate::errors::StorvalError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = storval_core_types::schema::EVENT_END_ERROR,
            duration_ms = $started.elapsed().as_millis() as u64,
            err.code = storval_err.code(),
            error = %storval_err,
            $($($field)+)?
        )
    }};
}
