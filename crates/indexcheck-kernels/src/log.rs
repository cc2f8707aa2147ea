//! Rejection logging shared by the validators
//!
//! Each failed check is reported once, at `debug` level, at the point where
//! it short-circuits. Nothing is logged when the `tracing` feature is off.

use crate::error::{KernelResult, ValidationError};

/// Return `Err(err)` after logging it.
pub(crate) fn reject<T>(err: ValidationError) -> KernelResult<T> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        operation = %err.operation(),
        kind = ?err.kind(),
        "{}",
        err
    );
    Err(err)
}

/// Return early from the enclosing validator with `$err` unless `$cond` holds.
///
/// `$err` is only evaluated on failure.
macro_rules! ensure_arg {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return $crate::log::reject($err);
        }
    };
}

pub(crate) use ensure_arg;
