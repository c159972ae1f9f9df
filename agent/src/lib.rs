//! Management posture detection engine.
//!
//! Scans the local machine for third-party management tooling (MDM, RMM,
//! endpoint security and more), directory-join identity and policy
//! enrollment, and returns one [`posture_common::ManagementPosture`] report.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod domain;
pub mod infra;

pub use infra::scan_local_host;
