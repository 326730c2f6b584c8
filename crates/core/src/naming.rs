//! Artifact naming.
//!
//! The toolchain produces module-style filenames (name plus a platform/ABI
//! suffix); launcher executables instead carry the platform executable
//! suffix. The rename is a pure string transform with no I/O.

use crate::error::BuildError;

/// Turn a module-style filename into the final executable filename:
/// strip the configured module suffix, append the executable suffix
/// (empty on POSIX platforms).
///
/// A filename that does not carry the module suffix is rejected rather than
/// silently truncated.
pub fn executable_name(
    module_file_name: &str,
    module_suffix: &str,
    exe_suffix: &str,
) -> Result<String, BuildError> {
    let stem = module_file_name
        .strip_suffix(module_suffix)
        .ok_or_else(|| BuildError::Naming {
            name: module_file_name.to_string(),
            reason: format!("expected the module suffix '{module_suffix}'"),
        })?;
    Ok(format!("{stem}{exe_suffix}"))
}
