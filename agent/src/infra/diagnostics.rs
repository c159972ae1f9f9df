//! `DiagnosticsSink` backed by the `tracing` crate.

use crate::application::ports::{DiagnosticsSink, Level};

/// Forwards diagnostics to `tracing` with a `component` field.
///
/// Installing a subscriber is the embedding process's job.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn emit(&self, level: Level, component: &'static str, message: &str) {
        match level {
            Level::Debug => tracing::debug!(component, "{message}"),
            Level::Info => tracing::info!(component, "{message}"),
            Level::Warn => tracing::warn!(component, "{message}"),
            Level::Error => tracing::error!(component, "{message}"),
        }
    }
}
