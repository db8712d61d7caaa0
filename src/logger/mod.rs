//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Per-request completion logging in text or JSON format
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::RequestLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

/// Log server startup information
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(&format!("[SERVER] Listening on: http://{addr}"));
    write_info(&format!(
        "[CONFIG] trust_forwarded={}, trusted_subnets={}, default_locale={}",
        config.proxy.trust_forwarded,
        config.proxy.trusted_subnets.len(),
        config.detect.default_locale
    ));
}

/// Log a completed request in the configured access log format
pub fn log_request_completed(entry: &RequestLogEntry, format: &str) {
    let line = match format {
        "json" => entry.format_json(),
        _ => entry.format_text(),
    };
    write_access(&line);
}

/// Log warning message
pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log error message
pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}
