//! Registry key paths and `reg query` output parsing.

/// Registry hives reachable from a check value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryHive {
    LocalMachine,
    CurrentUser,
}

impl RegistryHive {
    /// Resolve a short or long hive alias, case-insensitively.
    #[must_use]
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_ascii_uppercase().as_str() {
            "HKLM" | "HKEY_LOCAL_MACHINE" => Some(Self::LocalMachine),
            "HKCU" | "HKEY_CURRENT_USER" => Some(Self::CurrentUser),
            _ => None,
        }
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::LocalMachine => "HKLM",
            Self::CurrentUser => "HKCU",
        }
    }

    /// Name `reg query` prints in its output.
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::LocalMachine => "HKEY_LOCAL_MACHINE",
            Self::CurrentUser => "HKEY_CURRENT_USER",
        }
    }
}

/// A `HIVE\subpath` registry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryPath {
    pub hive: RegistryHive,
    pub subpath: String,
}

impl RegistryPath {
    /// Parse `HIVE\subpath`. Returns `None` without a separator or for an
    /// unknown hive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (hive, subpath) = value.split_once('\\')?;
        Some(Self {
            hive: RegistryHive::from_alias(hive)?,
            subpath: subpath.to_string(),
        })
    }

    /// Key argument for `reg query`.
    #[must_use]
    pub fn query_arg(&self) -> String {
        format!("{}\\{}", self.hive.short_name(), self.subpath)
    }

    /// Fully spelled key as printed by `reg query`.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}\\{}", self.hive.canonical_name(), self.subpath)
    }
}

impl std::fmt::Display for RegistryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.query_arg())
    }
}

/// Direct subkey names listed by `reg query <key>`.
///
/// `reg query` prints the queried key, its values (indented), then one full
/// path per direct subkey.
#[must_use]
pub fn parse_reg_query_subkeys(output: &str, key: &RegistryPath) -> Vec<String> {
    let prefix = format!("{}\\", key.canonical()).to_ascii_lowercase();
    output
        .lines()
        .map(str::trim_end)
        .filter_map(|line| {
            let lower = line.to_ascii_lowercase();
            if !lower.starts_with(&prefix) {
                return None;
            }
            let name = &line[prefix.len()..];
            (!name.is_empty() && !name.contains('\\')).then(|| name.to_string())
        })
        .collect()
}
