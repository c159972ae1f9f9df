//! Application services: use-case orchestration.
//!
//! Each service module implements one part of the scan by composing domain
//! logic with port trait calls. Services import only from `crate::domain`
//! and `crate::application::ports`, never from `crate::infra`.

pub mod identity_collector;
pub mod policy_collector;
pub mod posture_scan;
pub mod probe_evaluator;
pub mod process_snapshot;
pub mod signature_matcher;

use std::process::Output;

/// Stdout followed by stderr, lossily decoded.
pub(crate) fn combined_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}
