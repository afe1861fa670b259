//! Operating system classification.

use std::sync::OnceLock;

use serde::Serialize;

/// Coarse operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsType {
    Windows,
    Linux,
    Other,
}

impl OsType {
    /// Classifies an OS name such as `Windows 10`, `linux` or `macos`.
    pub fn from_os_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("win") {
            OsType::Windows
        } else if name.contains("nux") {
            OsType::Linux
        } else {
            OsType::Other
        }
    }

    /// The OS this process runs on, detected once.
    pub fn current() -> Self {
        static DETECTED: OnceLock<OsType> = OnceLock::new();
        *DETECTED.get_or_init(|| OsType::from_os_name(std::env::consts::OS))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsType::Windows => "windows",
            OsType::Linux => "linux",
            OsType::Other => "other",
        }
    }
}

impl std::fmt::Display for OsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
