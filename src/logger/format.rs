//! Access log format module
//!
//! Supports two completion-line formats:
//! - `text` (human-readable single line)
//! - `json` (structured, one object per line)

use chrono::Local;
use std::time::Duration;

/// One completed request, logged at dispatch after the response is built.
#[derive(Debug, Clone)]
pub struct RequestLogEntry {
    /// Resolved client IP address
    pub ip: String,
    /// HTTP method (GET, HEAD, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
    /// Request processing time in microseconds
    pub duration_us: u64,
    /// Completion timestamp
    pub time: chrono::DateTime<Local>,
}

impl RequestLogEntry {
    pub fn new(
        ip: String,
        method: String,
        path: String,
        status: u16,
        body_bytes: u64,
        duration: Duration,
    ) -> Self {
        Self {
            ip,
            method,
            path,
            status,
            body_bytes,
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            time: Local::now(),
        }
    }

    /// Format as a single human-readable line
    pub fn format_text(&self) -> String {
        format!(
            "[{}] {} \"{} {}\" {} {} {}us",
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.ip,
            self.method,
            self.path,
            self.status,
            self.body_bytes,
            self.duration_us
        )
    }

    /// Format as one JSON object per line
    pub fn format_json(&self) -> String {
        serde_json::json!({
            "time": self.time.to_rfc3339(),
            "ip": self.ip,
            "method": self.method,
            "path": self.path,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "duration_us": self.duration_us,
        })
        .to_string()
    }
}
