//! Wire types for management posture reports.
//!
//! Field names, category keys and enum spellings are a contract with report
//! consumers and must round-trip unchanged through serialization.

pub mod signature;
pub mod types;

pub use signature::{Check, CheckKind, Signature, SignatureDatabase};
pub use types::*;
