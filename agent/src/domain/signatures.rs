//! Signature database validation and lint.
//!
//! Validation rejects databases the engine cannot evaluate meaningfully.
//! Lint flags conventions and redundancies without changing evaluation:
//! per-check OS guards are kept and honoured even when the signature's own
//! OS set already implies them.

use std::collections::HashSet;
use std::fmt;

use posture_common::{CheckKind, Signature};

use crate::domain::error::SignatureError;

/// Outcome of a version probe.
///
/// Extraction is not implemented, so no lookup can yet report a version or
/// its absence. Callers match on the outcome rather than on an `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VersionLookup {
    Unsupported,
}

impl VersionLookup {
    /// The version string, if one was found.
    #[must_use]
    pub fn into_version(self) -> Option<String> {
        match self {
            Self::Unsupported => None,
        }
    }
}

/// Check a signature database for structural errors.
///
/// # Errors
///
/// Returns the first signature with an empty name, an empty OS set or no
/// checks, or the first name repeated within one category. The same tool may
/// appear once per category.
pub fn validate_signatures(signatures: &[Signature]) -> Result<(), SignatureError> {
    let mut seen = HashSet::new();
    for (index, sig) in signatures.iter().enumerate() {
        if sig.name.trim().is_empty() {
            return Err(SignatureError::MissingName { index });
        }
        if sig.os.is_empty() {
            return Err(SignatureError::MissingOs {
                name: sig.name.clone(),
            });
        }
        if sig.checks.is_empty() {
            return Err(SignatureError::NoChecks {
                name: sig.name.clone(),
            });
        }
        if !seen.insert((sig.name.as_str(), sig.category)) {
            return Err(SignatureError::Duplicate {
                name: sig.name.clone(),
                category: sig.category,
            });
        }
    }
    Ok(())
}

/// A non-fatal observation about a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureLint {
    /// The first check cannot short-circuit on a running tool.
    LeadsWithInstalledCheck { signature: String, kind: CheckKind },
    /// A check guard repeats the signature's only OS.
    RedundantCheckGuard {
        signature: String,
        check: usize,
        os: String,
    },
    /// A check guard names an OS the signature never runs on.
    UnreachableCheck {
        signature: String,
        check: usize,
        os: String,
    },
    UnknownCheckKind { signature: String, check: usize },
}

impl fmt::Display for SignatureLint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeadsWithInstalledCheck { signature, kind } => write!(
                f,
                "signature '{signature}' leads with {kind} instead of an active-state check"
            ),
            Self::RedundantCheckGuard {
                signature,
                check,
                os,
            } => write!(
                f,
                "signature '{signature}' check #{check} repeats the signature OS '{os}'"
            ),
            Self::UnreachableCheck {
                signature,
                check,
                os,
            } => write!(
                f,
                "signature '{signature}' check #{check} is guarded to '{os}', which the signature does not target"
            ),
            Self::UnknownCheckKind { signature, check } => {
                write!(f, "signature '{signature}' check #{check} has an unknown type")
            }
        }
    }
}

/// Collect lint for every signature, in database order.
#[must_use]
pub fn lint_signatures(signatures: &[Signature]) -> Vec<SignatureLint> {
    let mut lints = Vec::new();
    for sig in signatures {
        if let Some(first) = sig.checks.first()
            && !first.kind.reveals_active_state()
        {
            lints.push(SignatureLint::LeadsWithInstalledCheck {
                signature: sig.name.clone(),
                kind: first.kind,
            });
        }
        for (check, c) in sig.checks.iter().enumerate() {
            if c.kind == CheckKind::Unknown {
                lints.push(SignatureLint::UnknownCheckKind {
                    signature: sig.name.clone(),
                    check,
                });
            }
            let Some(os) = c.guard() else { continue };
            if !sig.matches_os(os) {
                lints.push(SignatureLint::UnreachableCheck {
                    signature: sig.name.clone(),
                    check,
                    os: os.to_string(),
                });
            } else if sig.os.len() == 1 {
                lints.push(SignatureLint::RedundantCheckGuard {
                    signature: sig.name.clone(),
                    check,
                    os: os.to_string(),
                });
            }
        }
    }
    lints
}

// ── Unit tests ────────────────────────────────────────────────────────────────
