use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use frost_core::{patch_spec, rename_package};
use frost_platform::RuntimeVars;

use crate::output::print_success;

pub fn cmd_rpm_patch(spec_file: &Path) -> Result<()> {
    let content = fs::read_to_string(spec_file)
        .with_context(|| format!("reading {}", spec_file.display()))?;
    let mut lines: Vec<String> = content.lines().map(String::from).collect();

    patch_spec(&mut lines);
    fs::write(spec_file, lines.join("\n") + "\n")
        .with_context(|| format!("writing {}", spec_file.display()))?;

    print_success(&format!("patched {}", spec_file.display()));
    Ok(())
}

pub fn cmd_rpm_rename(dist_dir: &Path, spec_file: &Path, python: &Path) -> Result<()> {
    let runtime = RuntimeVars::query(python)
        .with_context(|| format!("querying build configuration from {}", python.display()))?;

    let renamed = rename_package(dist_dir, spec_file, runtime.version())?;
    print_success(&format!("renamed package to {}", renamed.display()));
    Ok(())
}
