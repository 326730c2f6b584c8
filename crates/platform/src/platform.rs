//! Operating system and compiler-family detection

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Detect the current operating system at compile time
    #[cfg(target_os = "linux")]
    pub const fn current() -> Self {
        Os::Linux
    }

    #[cfg(target_os = "macos")]
    pub const fn current() -> Self {
        Os::Darwin
    }

    #[cfg(target_os = "windows")]
    pub const fn current() -> Self {
        Os::Windows
    }

    /// Returns the OS name as used in build output paths
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == Os::Windows
    }

    /// Suffix appended to executable filenames on this OS
    pub const fn exe_suffix(&self) -> &'static str {
        match self {
            Os::Windows => ".exe",
            Os::Linux | Os::Darwin => "",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiler family driving the build.
///
/// The family decides linker flag syntax: MSVC and MinGW flags are mutually
/// exclusive, and everything else is assumed to take POSIX-style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    Msvc,
    Mingw,
    Unix,
}

impl CompilerFamily {
    /// Detect the compiler family for the given OS.
    ///
    /// On Windows, `CC` naming a gcc-style driver selects MinGW; the default
    /// is MSVC. Everywhere else the family is Unix regardless of `CC`.
    pub fn detect(os: Os) -> Self {
        if !os.is_windows() {
            return CompilerFamily::Unix;
        }
        match env::var("CC") {
            Ok(cc) if cc.contains("gcc") || cc.contains("mingw") => CompilerFamily::Mingw,
            _ => CompilerFamily::Msvc,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Mingw => "mingw",
            CompilerFamily::Unix => "unix",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
