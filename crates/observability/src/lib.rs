//! Tracing/logging setup shared by the toolscout binaries and tests.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging with JSON output and an `info` default.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json, "info");
}

/// Initialize process-wide logging with an explicit format and default filter.
///
/// `RUST_LOG`, when set, still wins over `default_filter`.
pub fn init_with(format: LogFormat, default_filter: &str) {
    tracing::init(format, default_filter);
}
