//! Maps request failures to the messages shown to site visitors.

use crate::{ApiError, Diagnostics};

pub const AUTH_FAILED: &str = "Authentication failed. Please check your credentials.";
pub const ACCESS_DENIED: &str = "Access denied. You do not have permission for this action.";
pub const NOT_FOUND: &str = "Resource not found.";
pub const RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Returns the user-facing message for a failed request.
///
/// Pure: the same error always yields the same string.
pub fn describe_error(err: &ApiError) -> String {
    match err {
        ApiError::Http { status, .. } => {
            let detail = err.server_detail();
            match status {
                400 => format!(
                    "Validation error: {}",
                    detail.unwrap_or("Invalid data provided")
                ),
                401 => AUTH_FAILED.to_owned(),
                403 => ACCESS_DENIED.to_owned(),
                404 => NOT_FOUND.to_owned(),
                429 => RATE_LIMITED.to_owned(),
                500 => SERVER_ERROR.to_owned(),
                other => format!(
                    "Server error ({other}): {}",
                    detail.unwrap_or("Unknown error")
                ),
            }
        }
        ApiError::Network(_) => NETWORK_ERROR.to_owned(),
        ApiError::Validation(message) => message.clone(),
        ApiError::MalformedResponse(_) => UNEXPECTED_ERROR.to_owned(),
    }
}

/// Like [`describe_error`], but records the failure with its context label.
pub fn describe_error_in(diag: &Diagnostics, context: &str, err: &ApiError) -> String {
    diag.log(format_args!("API Error in {context}: {err}"));
    describe_error(err)
}
