//! Process table enumeration backed by `sysinfo`.

use anyhow::{Result, bail};
use sysinfo::System;

use crate::application::ports::{ProcessEntry, ProcessSource};

/// Production `ProcessSource`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProcessSource;

impl ProcessSource for SysinfoProcessSource {
    fn list_processes(&self) -> Result<Vec<ProcessEntry>> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            bail!(
                "process enumeration is not supported on {}",
                std::env::consts::OS
            );
        }
        let mut system = System::new();
        system.refresh_processes();
        Ok(system
            .processes()
            .values()
            .map(|process| ProcessEntry {
                name: Some(process.name().to_string()),
            })
            .collect())
    }
}
