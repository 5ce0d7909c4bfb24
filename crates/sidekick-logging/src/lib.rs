// Logging module - verbose dumps of outbound completion traffic
pub mod request_logger;

pub use request_logger::{format_request, format_response, log_request, log_response};

/// Bodies longer than this are truncated in dumps
pub const MAX_DUMP_CHARS: usize = 5000;

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = max_chars.saturating_sub(3);
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Keep only a short prefix of a secret for display
pub fn redact_key(api_key: &str) -> String {
    format!("{}***", api_key.chars().take(6).collect::<String>())
}
