//! Application service: match one signature against the host.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use posture_common::{Check, CheckKind, Detection, DetectionStatus, Signature};

use crate::application::ports::HostProbes;
use crate::application::services::probe_evaluator::ProbeEvaluator;
use crate::domain::signatures::VersionLookup;

/// Evaluate `signature`'s checks in order, stopping at the first match.
///
/// Returns `None` when no check matches. A match on a service or process
/// check marks the tool active; any other kind only proves it is installed.
pub async fn evaluate_signature<H: HostProbes>(
    evaluator: &ProbeEvaluator<'_, H>,
    signature: &Signature,
) -> Option<Detection> {
    for check in &signature.checks {
        if !evaluator.evaluate(check).await {
            continue;
        }
        let mut detection = Detection::new(&signature.name, status_for(check.kind));
        if check.kind == CheckKind::ServiceRunning {
            detection.service_name = Some(check.value.clone());
        }
        if let Some(version_check) = &signature.version {
            detection.version = extract_version(evaluator, version_check).into_version();
        }
        return Some(detection);
    }
    None
}

fn status_for(kind: CheckKind) -> DetectionStatus {
    if kind.reveals_active_state() {
        DetectionStatus::Active
    } else {
        DetectionStatus::Installed
    }
}

/// Version probing is not implemented yet; every lookup is `Unsupported`.
#[must_use]
pub fn extract_version<H: HostProbes>(
    _evaluator: &ProbeEvaluator<'_, H>,
    _check: &Check,
) -> VersionLookup {
    VersionLookup::Unsupported
}
