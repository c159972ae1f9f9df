//! Signature database loading from YAML or JSON files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use posture_common::{Signature, SignatureDatabase};

use crate::application::ports::{DiagnosticsSink, SignatureSource};
use crate::domain::config::ScanConfig;
use crate::domain::signatures::{lint_signatures, validate_signatures};

const COMPONENT: &str = "signatures";

/// Loads a `{ signatures: [...] }` document.
///
/// Files ending in `.json` are read as JSON, anything else as YAML. The
/// database is validated; lint findings are logged at warn and do not
/// reject it.
pub struct SignatureFileStore<'a> {
    path: PathBuf,
    diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a> SignatureFileStore<'a> {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, diagnostics: &'a dyn DiagnosticsSink) -> Self {
        Self {
            path: path.into(),
            diagnostics,
        }
    }

    /// Store for `config.signatures_path`, if one is configured.
    #[must_use]
    pub fn from_config(config: &ScanConfig, diagnostics: &'a dyn DiagnosticsSink) -> Option<Self> {
        config
            .signatures_path
            .as_ref()
            .map(|path| Self::new(path.clone(), diagnostics))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SignatureSource for SignatureFileStore<'_> {
    fn load(&self) -> Result<Vec<Signature>> {
        let path = &self.path;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let database: SignatureDatabase = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("cannot parse {}", path.display()))?
        };

        validate_signatures(&database.signatures)
            .with_context(|| format!("invalid signature database {}", path.display()))?;
        for lint in lint_signatures(&database.signatures) {
            self.diagnostics.warn(COMPONENT, &lint.to_string());
        }
        self.diagnostics.debug(
            COMPONENT,
            &format!(
                "loaded {} signatures from {}",
                database.signatures.len(),
                path.display()
            ),
        );
        Ok(database.signatures)
    }
}
