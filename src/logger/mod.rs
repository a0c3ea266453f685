//! Logger module
//!
//! Logging utilities for the dispatch engine:
//! - Server lifecycle logging
//! - Registration logging (routes, duplicates, rejected contexts)
//! - Access and dispatch-failure logging
//! - Optional file-based output

pub mod writer;

use chrono::Local;
use std::net::SocketAddr;

use crate::config::Config;

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
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, route_count: usize) {
    write_info("======================================");
    write_info("Dispatch server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Registered operations: {route_count}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_route_registered(verb: &str, path_key: &str) {
    write_info(&format!("[Route] Registered {verb} {path_key}"));
}

pub fn log_duplicate_route(verb: &str, path_key: &str) {
    write_error(&format!(
        "[WARN] Duplicate route {verb} {path_key}: previous operation overwritten"
    ));
}

/// A context whose extraction failed is skipped; startup continues.
pub fn log_context_error(base_path: &str, err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Skipping context {base_path}: {err}"));
}

/// Combined-style access line with the response status and body size.
pub fn log_access(peer: &SocketAddr, method: &str, path: &str, status: u16, body_bytes: usize) {
    let time = Local::now().format("%d/%b/%Y:%H:%M:%S %z");
    write_info(&format!(
        "{peer} - - [{time}] \"{method} {path}\" {status} {body_bytes}"
    ));
}

pub fn log_dispatch_failure(method: &str, path: &str, err: &impl std::fmt::Display) {
    write_error(&format!("[Dispatch] {method} {path} failed: {err}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
