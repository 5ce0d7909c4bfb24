use colored::Colorize;
use serde::Serialize;

use crate::{redact_key, safe_truncate, MAX_DUMP_CHARS};

fn truncated_body(body: &str) -> String {
    if body.chars().count() > MAX_DUMP_CHARS {
        format!(
            "{}\n{}",
            safe_truncate(body, MAX_DUMP_CHARS),
            format!("... (truncated, total {} bytes)", body.len()).bright_black()
        )
    } else {
        body.to_string()
    }
}

/// Render an outbound completion request for the console
pub fn format_request<T: Serialize + ?Sized>(url: &str, request: &T, api_key: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "═".repeat(80).bright_cyan()));
    out.push_str(&format!("{}\n", "HTTP REQUEST".bright_cyan().bold()));
    out.push_str(&format!("{}\n", "═".repeat(80).bright_cyan()));

    match reqwest::Url::parse(url) {
        Ok(parsed_url) => {
            out.push_str(&format!("{}: {}\n", "URL".bright_yellow(), url));
            out.push_str(&format!(
                "{}: {}\n",
                "Host".bright_yellow(),
                parsed_url.host_str().unwrap_or("unknown")
            ));
        }
        Err(_) => out.push_str(&format!("{}: {}\n", "URL".bright_yellow(), url)),
    }

    out.push_str(&format!("\n{}\n", "Headers:".bright_yellow()));
    out.push_str("  Content-Type: application/json\n");
    out.push_str(&format!("  Authorization: Bearer {}\n", redact_key(api_key)));

    out.push_str(&format!("\n{}\n", "Request Body:".bright_yellow()));
    match serde_json::to_string_pretty(request) {
        Ok(json) => out.push_str(&truncated_body(&json)),
        Err(e) => out.push_str(&format!("{}", format!("Error serializing request: {}", e).red())),
    }
    out.push('\n');
    out.push_str(&"═".repeat(80).bright_cyan().to_string());
    out
}

/// Render a completion response for the console
pub fn format_response(status: reqwest::StatusCode, body: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "═".repeat(80).bright_green()));
    out.push_str(&format!("{}\n", "HTTP RESPONSE".bright_green().bold()));
    out.push_str(&format!("{}\n", "═".repeat(80).bright_green()));
    out.push_str(&format!(
        "{}: {} {}\n",
        "Status".bright_yellow(),
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    ));

    out.push_str(&format!("\n{}\n", "Response Body:".bright_yellow()));
    // Try to pretty-print JSON, fall back to raw text
    let rendered = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| body.to_string());
    out.push_str(&truncated_body(&rendered));
    out.push('\n');
    out.push_str(&"═".repeat(80).bright_green().to_string());
    out
}

/// Log HTTP request details for debugging (console output)
pub fn log_request<T: Serialize + ?Sized>(url: &str, request: &T, api_key: &str, verbose: bool) {
    if !verbose {
        return;
    }
    println!("\n{}\n", format_request(url, request, api_key));
}

/// Log HTTP response details for debugging (console output)
pub fn log_response(status: reqwest::StatusCode, body: &str, verbose: bool) {
    if !verbose {
        return;
    }
    println!("\n{}\n", format_response(status, body));
}
