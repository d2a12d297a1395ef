//! Operation boundary macros
//!
//! Every logged operation emits exactly one `start` event and one `end`
//! or `end_error` event, all tagged with the emitting module.

/// Log the start of an operation
///
/// ```
/// # use sideload_core::log_op_start;
/// log_op_start!("assemble");
/// log_op_start!("assemble", primary_type = "post");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use sideload_core::log_op_end;
/// log_op_end!("assemble", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        $crate::__tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation failure with its stable error code
///
/// Accepts anything convertible into `ExError`, including `&SideloadError`.
///
/// ```
/// # use sideload_core::{log_op_error, errors::SideloadError};
/// let err = SideloadError::MissingTargetType { alias: "tags".to_string() };
/// log_op_error!("assemble", &err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = ($err).into();
        $crate::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = ($err).into();
        $crate::__tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
