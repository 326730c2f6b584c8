use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;

use frost_core::{BuildContext, BuildOptions, CcToolchain, Orchestrator, default_targets};
use frost_platform::RuntimeVars;

use crate::output::{format_duration, print_info, print_stat, print_success};

pub fn cmd_build(python: &Path, build_dir: &Path, debug: bool) -> Result<()> {
    let started = Instant::now();

    let runtime = RuntimeVars::query(python)
        .with_context(|| format!("querying build configuration from {}", python.display()))?;
    let ctx = BuildContext::current(runtime);
    print_info(&format!(
        "building for {} with the {} toolchain",
        ctx.os, ctx.compiler
    ));

    let options = BuildOptions {
        build_temp: build_dir.join("temp"),
        build_lib: build_dir.join("lib"),
        debug,
    };
    fs::create_dir_all(&options.build_lib)?;

    let root = std::env::current_dir()?;
    let targets = default_targets(ctx.os, &root);
    let toolchain = CcToolchain::new(ctx.compiler);
    let orchestrator = Orchestrator::new(&toolchain, &ctx, options);

    let artifacts = orchestrator.build_all(&targets)?;
    for artifact in &artifacts {
        print_stat(&artifact.target, &artifact.path.display().to_string());
    }
    print_success(&format!(
        "built {} target(s) in {}",
        artifacts.len(),
        format_duration(started.elapsed())
    ));

    Ok(())
}
