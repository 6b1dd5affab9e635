//! Tracing/logging setup shared by the server and client binaries.

/// Initialize process-wide logging for a long-running service (stdout,
/// default level `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env(), "info", tracing::Output::Stdout);
}

/// Initialize logging for a command-line tool: diagnostics go to stderr so
/// stdout carries only the tool's own output.
pub fn init_for_cli() {
    tracing::init(tracing::LogFormat::from_env(), "warn", tracing::Output::Stderr);
}

/// Tracing configuration (filters, formats, timestamps).
pub mod tracing;
