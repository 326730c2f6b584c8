//! Runtime-build variable provider.
//!
//! The launcher executables link directly against the embeddable Python
//! library, so the build needs the configuration recorded when that runtime
//! was compiled: filename suffixes, the static-library directory, and the
//! flag soup required to embed the interpreter. These values are queried
//! from the interpreter itself and treated as read-only for the whole build.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::error::PlatformError;

/// One-shot probe printed by the target interpreter. Keeping the subset
/// explicit avoids dragging the full sysconfig dump through JSON.
const PROBE: &str = "\
import json, sys, sysconfig
keys = ['EXT_SUFFIX', 'SO', 'LIBPL', 'LINKFORSHARED', 'LIBS', 'LIBM', 'BASEMODLIBS', 'LOCALMODLIBS']
vars = {k: v for k, v in ((k, sysconfig.get_config_var(k)) for k in keys) if v is not None}
print(json.dumps({
    'vars': {k: str(v) for k, v in vars.items()},
    'version': [sys.version_info[0], sys.version_info[1]],
    'abiflags': getattr(sys, 'abiflags', ''),
}))
";

#[derive(Deserialize)]
struct Probe {
    vars: BTreeMap<String, String>,
    version: (u32, u32),
    abiflags: String,
}

/// Variables recorded when the embedded runtime was built.
///
/// Immutable once resolved; accessors distinguish required keys (absence is
/// a [`PlatformError::MissingVar`]) from optional flag lists that default to
/// empty.
#[derive(Debug, Clone)]
pub struct RuntimeVars {
    vars: BTreeMap<String, String>,
    version: (u32, u32),
    abiflags: String,
}

impl RuntimeVars {
    /// Query the interpreter at `python` for its build configuration.
    pub fn query(python: &Path) -> Result<Self, PlatformError> {
        debug!(python = %python.display(), "querying interpreter build configuration");

        let output = Command::new(python).arg("-c").arg(PROBE).output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PlatformError::InterpreterQuery(stderr.trim().to_string()));
        }

        let probe: Probe = serde_json::from_slice(&output.stdout)?;
        Ok(Self {
            vars: probe.vars,
            version: probe.version,
            abiflags: probe.abiflags,
        })
    }

    /// Build from an already-resolved variable map. Used by fixtures and by
    /// callers that read the configuration from somewhere other than a live
    /// interpreter.
    pub fn from_map(
        vars: BTreeMap<String, String>,
        version: (u32, u32),
        abiflags: impl Into<String>,
    ) -> Self {
        Self {
            vars,
            version,
            abiflags: abiflags.into(),
        }
    }

    /// Interpreter (major, minor) version
    pub fn version(&self) -> (u32, u32) {
        self.version
    }

    /// ABI-flag suffix baked into the runtime library name (may be empty)
    pub fn abiflags(&self) -> &str {
        &self.abiflags
    }

    /// Optional variable; missing keys read as empty
    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map(String::as_str).unwrap_or("")
    }

    /// Required variable
    pub fn require(&self, key: &str) -> Result<&str, PlatformError> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PlatformError::MissingVar(key.to_string()))
    }

    /// Suffix the toolchain puts on loadable-module filenames.
    ///
    /// `EXT_SUFFIX` on current runtimes, with the legacy `SO` spelling as a
    /// fallback.
    pub fn module_suffix(&self) -> Result<&str, PlatformError> {
        self.require("EXT_SUFFIX").or_else(|_| self.require("SO"))
    }

    /// Directory holding the embeddable runtime library
    pub fn library_search_path(&self) -> Result<&str, PlatformError> {
        self.require("LIBPL")
    }

    /// Name of the embeddable runtime library, e.g. `python3.6m`
    pub fn runtime_library(&self) -> String {
        let (major, minor) = self.version;
        format!("python{}.{}{}", major, minor, self.abiflags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> RuntimeVars {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeVars::from_map(map, (3, 6), "m")
    }

    #[test]
    fn test_runtime_library_includes_abiflags() {
        let rt = vars(&[]);
        assert_eq!(rt.runtime_library(), "python3.6m");
    }

    #[test]
    fn test_module_suffix_prefers_ext_suffix() {
        let rt = vars(&[("EXT_SUFFIX", ".cpython-36m-x86_64-linux-gnu.so"), ("SO", ".so")]);
        assert_eq!(rt.module_suffix().unwrap(), ".cpython-36m-x86_64-linux-gnu.so");
    }

    #[test]
    fn test_module_suffix_falls_back_to_so() {
        let rt = vars(&[("SO", ".so")]);
        assert_eq!(rt.module_suffix().unwrap(), ".so");
    }

    #[test]
    fn test_missing_required_var_is_an_error() {
        let rt = vars(&[]);
        let err = rt.library_search_path().unwrap_err();
        assert!(matches!(err, PlatformError::MissingVar(ref k) if k == "LIBPL"));
    }

    #[test]
    fn test_optional_vars_read_as_empty() {
        let rt = vars(&[("LIBS", "-lc")]);
        assert_eq!(rt.get("LIBS"), "-lc");
        assert_eq!(rt.get("BASEMODLIBS"), "");
    }
}
