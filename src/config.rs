// Configuration constants, loaded from the environment where applicable.

use std::env;

lazy_static::lazy_static! {
    /// Base URL of the external inference backend.
    pub static ref BACKEND_URL: String =
        env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
}

// Fixed hints sent with every backend request.
pub const BACKEND_TOP_K: u32 = 5;
pub const BACKEND_MAX_TOKENS: u32 = 500;

/// Substituted when the backend payload carries no `response` field.
pub const MISSING_RESPONSE_FALLBACK: &str = "Sorry, I could not process your request.";

/// Shown to the user whenever the relay or the backend fails for any reason.
pub const FAILURE_FALLBACK: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Error text returned with a 400 when the message field is missing or not a string.
pub const VALIDATION_ERROR: &str = "Message is required";

/// Error text returned with a 500 on any backend or processing failure.
pub const RELAY_ERROR: &str = "Failed to get a response from the assistant";
