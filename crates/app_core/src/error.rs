use std::fmt::Display;

use tracing::error;

/// Logs the error side of a result and hands the result back untouched.
pub trait LogErr {
    fn log_err(self, operation: &str) -> Self;
}

impl<T, E: Display> LogErr for Result<T, E> {
    fn log_err(self, operation: &str) -> Self {
        if let Err(err) = &self {
            error!(operation, "error in {operation}: {err}");
        }
        self
    }
}
