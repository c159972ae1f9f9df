//! Application service: the posture scan use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! The scan cannot fail: every fault below it degrades to a missing detection
//! or an entry in the report's `errors` list.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;
use futures_util::FutureExt;
use posture_common::{Category, Detection, IdentityStatus, ManagementPosture, Signature};

use crate::application::ports::{
    DiagnosticsSink, HostProbes, IdentityCollector, PolicyCollector, ProcessSource,
};
use crate::application::services::probe_evaluator::ProbeEvaluator;
use crate::application::services::process_snapshot::ProcessSnapshot;
use crate::application::services::signature_matcher::evaluate_signature;
use crate::domain::error::CollectorFault;
use crate::domain::platform::Platform;

const COMPONENT: &str = "posture_scan";

/// Report fields written while the scan runs.
#[derive(Default)]
struct Draft {
    categories: BTreeMap<Category, Vec<Detection>>,
    identity: IdentityStatus,
    errors: Vec<String>,
}

fn lock(draft: &Mutex<Draft>) -> MutexGuard<'_, Draft> {
    draft.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs one management posture scan against injected host ports.
pub struct PostureScanner<'a, H, S, I, P> {
    host: &'a H,
    processes: &'a S,
    identity: &'a I,
    policy: &'a P,
    platform: Platform,
    command_timeout: Duration,
    diagnostics: &'a dyn DiagnosticsSink,
}

impl<'a, H, S, I, P> PostureScanner<'a, H, S, I, P>
where
    H: HostProbes,
    S: ProcessSource,
    I: IdentityCollector,
    P: PolicyCollector,
{
    #[must_use]
    pub fn new(
        host: &'a H,
        processes: &'a S,
        identity: &'a I,
        policy: &'a P,
        platform: Platform,
        command_timeout: Duration,
        diagnostics: &'a dyn DiagnosticsSink,
    ) -> Self {
        Self {
            host,
            processes,
            identity,
            policy,
            platform,
            command_timeout,
            diagnostics,
        }
    }

    /// Scan the host against `signatures` and build the report.
    ///
    /// Signatures that do not list this platform are skipped. Within a
    /// category, detections keep database order; policy detections follow
    /// any signature detections under the policy-engine category.
    pub async fn scan(&self, signatures: &[Signature]) -> ManagementPosture {
        let started = Instant::now();
        let collected_at = Utc::now();
        let draft = Mutex::new(Draft::default());

        let snapshot = match ProcessSnapshot::capture(self.processes, self.diagnostics) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.diagnostics
                    .warn(COMPONENT, &format!("process snapshot failed: {e:#}"));
                lock(&draft).errors.push(format!("process snapshot: {e:#}"));
                ProcessSnapshot::default()
            }
        };

        let evaluator = ProbeEvaluator::new(
            self.host,
            &snapshot,
            self.platform,
            self.command_timeout,
            self.diagnostics,
        );
        let os = self.platform.os_name();
        for signature in signatures.iter().filter(|s| s.matches_os(os)) {
            if let Some(detection) = evaluate_signature(&evaluator, signature).await {
                lock(&draft)
                    .categories
                    .entry(signature.category)
                    .or_default()
                    .push(detection);
            }
        }

        let identity_task = async {
            match isolate("identity", self.identity.collect_identity()).await {
                Ok(identity) => lock(&draft).identity = identity,
                Err(fault) => self.record_fault(&draft, &fault),
            }
        };
        let policy_task = async {
            match isolate("policy", self.policy.collect_policies()).await {
                Ok(detections) if detections.is_empty() => {}
                Ok(detections) => lock(&draft)
                    .categories
                    .entry(Category::PolicyEngine)
                    .or_default()
                    .extend(detections),
                Err(fault) => self.record_fault(&draft, &fault),
            }
        };
        tokio::join!(identity_task, policy_task);

        let draft = draft.into_inner().unwrap_or_else(PoisonError::into_inner);
        let posture = ManagementPosture {
            collected_at,
            scan_duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            categories: draft.categories,
            identity: draft.identity,
            errors: draft.errors,
        };

        self.diagnostics.info(
            COMPONENT,
            &format!(
                "management posture scan complete: duration_ms={} detections={} errors={} processes={}",
                posture.scan_duration_ms,
                posture.detection_count(),
                posture.errors.len(),
                snapshot.count(),
            ),
        );
        posture
    }

    fn record_fault(&self, draft: &Mutex<Draft>, fault: &CollectorFault) {
        self.diagnostics.error(COMPONENT, &fault.to_string());
        lock(draft).errors.push(fault.to_string());
    }
}

/// Await a collector future, converting an `Err` or a panic into a
/// [`CollectorFault`] for `task`.
///
/// # Errors
///
/// Returns `CollectorFault::Failed` when the collector returns an error and
/// `CollectorFault::Panicked` when it panics.
pub async fn isolate<T>(
    task: &'static str,
    collector: impl Future<Output = anyhow::Result<T>>,
) -> Result<T, CollectorFault> {
    match AssertUnwindSafe(collector).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CollectorFault::Failed {
            task,
            reason: format!("{e:#}"),
        }),
        Err(payload) => Err(CollectorFault::Panicked {
            task,
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
