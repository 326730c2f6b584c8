//! RPM packaging post-processing.
//!
//! Two fixups around the generated source-package spec: the init scripts
//! and samples shipped as package data must not abort packaging as
//! unpackaged files, and the produced package file gets the interpreter
//! version embedded in its name so packages for different runtimes can
//! coexist.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::error::BuildError;

/// Directive disabling abort-on-unpackaged-file for the generated spec
const NO_UNPACKAGED_ABORT: &str = "%define _unpackaged_files_terminate_build 0%{nil}";

/// Naming template the package-query tool resolves against the spec
const QUERY_FORMAT: &str = "%{name}-%{version}-%{release}.%{arch}.rpm";

/// Prepend the directive that keeps unpackaged auxiliary files from
/// aborting the packaging run. Must happen before the spec is consumed by
/// the packaging tool. Idempotent: a spec that already carries the
/// directive is left unchanged.
pub fn patch_spec(lines: &mut Vec<String>) {
    if lines.iter().any(|l| l == NO_UNPACKAGED_ABORT) {
        return;
    }
    lines.insert(0, NO_UNPACKAGED_ABORT.to_string());
}

/// Ask the package-query tool for the canonical filename the spec would
/// produce.
pub fn query_package_name(spec_file: &Path) -> Result<String, BuildError> {
    debug!(spec = %spec_file.display(), "querying package file name");

    let output = Command::new("rpm")
        .args(["-q", "--qf", QUERY_FORMAT, "--specfile"])
        .arg(spec_file)
        .output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("rpm query failed: {}", stderr.trim())).into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let name = stdout.lines().next().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(io::Error::other("rpm query produced no output").into());
    }
    Ok(name)
}

/// Insert a `py{major}{minor}` component as the third element of a
/// `name-version-release.arch.rpm` filename.
///
/// Output that does not carry at least the name, version and release
/// components is rejected rather than silently producing a malformed name.
pub fn versioned_file_name(name: &str, version: (u32, u32)) -> Result<String, BuildError> {
    let mut parts: Vec<&str> = name.split('-').collect();
    if parts.len() < 3 {
        return Err(BuildError::Naming {
            name: name.to_string(),
            reason: "expected a name-version-release.arch.rpm filename".to_string(),
        });
    }
    let (major, minor) = version;
    let tag = format!("py{major}{minor}");
    parts.insert(2, &tag);
    Ok(parts.join("-"))
}

/// Rename the produced package in `dist_dir` to the version-qualified name.
///
/// Runs after packaging completes. Any failure leaves the original file in
/// place; nothing is moved on a malformed query result.
pub fn rename_package(
    dist_dir: &Path,
    spec_file: &Path,
    version: (u32, u32),
) -> Result<PathBuf, BuildError> {
    let original = query_package_name(spec_file)?;
    let renamed = versioned_file_name(&original, version)?;

    let from = dist_dir.join(&original);
    let to = dist_dir.join(&renamed);
    info!(from = %from.display(), to = %to.display(), "renaming package");
    fs::rename(&from, &to)?;
    Ok(to)
}
