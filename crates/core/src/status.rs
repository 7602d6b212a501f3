//! User-facing messages for HTTP status codes

/// Fallback message when an error body carries no `message`.
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request. Please check your input.",
        401 => "Unauthorized. Please log in again.",
        403 => "Access forbidden.",
        404 => "Resource not found.",
        409 => "Conflict (e.g. already exists).",
        422 => "Validation error.",
        500 => "Server error. Try again later.",
        s if s >= 500 => "Server error.",
        _ => "Something went wrong.",
    }
}
