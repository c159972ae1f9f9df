//! Application service: one-shot process table snapshot.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::collections::HashSet;

use anyhow::Result;

use crate::application::ports::{DiagnosticsSink, ProcessSource};

const COMPONENT: &str = "process_snapshot";

/// Lowercased names of every process running when the scan started.
///
/// Immutable after capture; shared read-only by every process check.
#[derive(Debug, Clone, Default)]
pub struct ProcessSnapshot {
    names: HashSet<String>,
    skipped: usize,
}

impl ProcessSnapshot {
    /// Enumerate processes once. Entries without a readable name are skipped
    /// and counted.
    ///
    /// # Errors
    ///
    /// Returns an error if the process table cannot be enumerated.
    pub fn capture(source: &impl ProcessSource, diagnostics: &dyn DiagnosticsSink) -> Result<Self> {
        let entries = source.list_processes()?;
        let mut names = HashSet::with_capacity(entries.len());
        let mut skipped = 0;
        for entry in entries {
            match entry.name.filter(|name| !name.is_empty()) {
                Some(name) => {
                    names.insert(name.to_lowercase());
                }
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            diagnostics.debug(
                COMPONENT,
                &format!("skipped {skipped} processes with unreadable names"),
            );
        }
        Ok(Self { names, skipped })
    }

    /// Build a snapshot from known names.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| n.as_ref().to_lowercase()).collect(),
            skipped: 0,
        }
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn is_running(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Number of distinct process names.
    #[must_use]
    pub fn count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
