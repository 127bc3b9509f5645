//! Logger module
//!
//! Server lifecycle logging, per-request access logging in several formats,
//! and error/warning channels. Output goes to stdout/stderr or to files,
//! per the logging configuration.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

/// Initialize the logger from configuration. Call once at startup.
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

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info(&format!("{} started", config.http.service_name));
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Environment: {}", config.server.environment));
    write_info(&format!("Serving assets from: {}", config.site.root));
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

/// Record an incoming request before any routing happens
pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    write_access(&format!(
        "[{}] \"{method} {uri} {version:?}\"",
        Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%z")
    ));
}

/// Write the formatted access log entry for a completed response
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
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

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_info(&format!("[Headers] Count: {count}"));
    }
}

pub fn log_signal_received(name: &str) {
    write_info(&format!("\n[SIGNAL] {name} received, shutting down gracefully"));
}

pub fn log_shutdown_draining(in_flight: usize) {
    write_info(&format!(
        "[Shutdown] Waiting for {in_flight} in-flight connection(s) to finish"
    ));
}

pub fn log_shutdown_complete() {
    write_info("[Shutdown] All connections drained, exiting");
}
