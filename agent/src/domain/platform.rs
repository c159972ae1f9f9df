//! Host platform identification.
//!
//! Signatures and check guards name operating systems in lowercase
//! (`windows`, `darwin`, `linux`); [`Platform::os_name`] produces the same
//! spelling so guards compare as plain strings.

/// Operating system family the scan runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    /// Any other target, carrying its `std::env::consts::OS` name.
    Other(&'static str),
}

impl Platform {
    /// The platform this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` or signature OS name to a platform.
    #[must_use]
    pub fn from_os(os: &'static str) -> Self {
        match os {
            "windows" => Self::Windows,
            "macos" | "darwin" => Self::MacOs,
            "linux" => Self::Linux,
            other => Self::Other(other),
        }
    }

    /// OS name as written in signature databases.
    #[must_use]
    pub fn os_name(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "darwin",
            Self::Linux => "linux",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.os_name())
    }
}
