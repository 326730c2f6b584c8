//! Build orchestration.
//!
//! Runs once per invocation, sequentially over the declared targets in
//! declaration order. Each target either takes the default module path or
//! the launcher path (compile, resolve linkage, link as an executable with
//! a renamed artifact). The first failure aborts the whole build.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::linkage::resolve_linkage;
use crate::naming::executable_name;
use crate::target::{BuildTarget, TargetKind};
use crate::toolchain::{CompileSpec, LinkSpec, Toolchain};
use frost_platform::CompilerFamily;

/// Run-path hint letting a launcher find its libraries next to itself or in
/// a `../lib` sibling directory
const RUN_PATH: &str = "${ORIGIN}:${ORIGIN}/../lib";

/// Manifest resource embedded into MinGW-built binaries
const MANIFEST_SOURCE: &str = "source/bases/manifest.rc";

/// Where build outputs land
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Scratch directory for object files
    pub build_temp: PathBuf,
    /// Output directory for finished binaries
    pub build_lib: PathBuf,
    pub debug: bool,
}

/// One finished target. Created once per target and never mutated; a
/// rebuild produces new artifacts.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub target: String,
    pub kind: TargetKind,
    pub path: PathBuf,
}

pub struct Orchestrator<'a, T: Toolchain> {
    toolchain: &'a T,
    ctx: &'a BuildContext,
    options: BuildOptions,
}

impl<'a, T: Toolchain> Orchestrator<'a, T> {
    pub fn new(toolchain: &'a T, ctx: &'a BuildContext, options: BuildOptions) -> Self {
        Self {
            toolchain,
            ctx,
            options,
        }
    }

    /// Build every target in declaration order, aborting on the first
    /// failure.
    pub fn build_all(&self, targets: &[BuildTarget]) -> Result<Vec<CompiledArtifact>, BuildError> {
        let mut artifacts = Vec::with_capacity(targets.len());
        for target in targets {
            artifacts.push(self.build(target)?);
        }
        Ok(artifacts)
    }

    pub fn build(&self, target: &BuildTarget) -> Result<CompiledArtifact, BuildError> {
        info!(target = %target.name, kind = ?target.kind, "building target");
        match target.kind {
            TargetKind::Module => self.build_module(target),
            TargetKind::Bootloader => self.build_bootloader(target),
        }
    }

    /// Default path: compile and link as a loadable module, keeping the
    /// module-style filename and the target's own library lists.
    fn build_module(&self, target: &BuildTarget) -> Result<CompiledArtifact, BuildError> {
        let objects = self.compile(target, target.sources.clone())?;

        let file_name = self.module_file_name(target)?;
        let output = self.options.build_lib.join(&file_name);
        let spec = LinkSpec {
            objects,
            output: output.clone(),
            libraries: target.libraries.clone(),
            library_dirs: target.library_dirs.clone(),
            runtime_library_dirs: target.runtime_library_dirs.clone(),
            extra_args: target.extra_link_args.clone(),
            run_path: None,
            debug: self.options.debug,
        };
        self.toolchain
            .link_module(&spec)
            .map_err(|e| BuildError::Link {
                target: target.name.clone(),
                message: e.0,
            })?;

        Ok(CompiledArtifact {
            target: target.name.clone(),
            kind: target.kind,
            path: output,
        })
    }

    /// Launcher path: compile (with the MinGW manifest resource when it
    /// applies), rename to the executable filename, resolve the linkage
    /// policy and link as an executable.
    fn build_bootloader(&self, target: &BuildTarget) -> Result<CompiledArtifact, BuildError> {
        let mut sources = target.sources.clone();
        if self.ctx.os.is_windows() && self.ctx.compiler == CompilerFamily::Mingw {
            sources.push(PathBuf::from(MANIFEST_SOURCE));
        }
        let objects = self.compile(target, sources)?;

        let module_name = self.module_file_name(target)?;
        let file_name = executable_name(
            &module_name,
            self.ctx.runtime.module_suffix()?,
            self.ctx.os.exe_suffix(),
        )?;
        let output = self.options.build_lib.join(&file_name);
        debug!(target = %target.name, output = %output.display(), "linking launcher");

        let linkage = resolve_linkage(target, self.ctx)?;
        let mut libraries = target.libraries.clone();
        libraries.extend(linkage.libraries);
        let mut library_dirs = target.library_dirs.clone();
        library_dirs.extend(linkage.library_dirs);
        let mut extra_args = target.extra_link_args.clone();
        extra_args.extend(linkage.extra_args);

        let run_path = (!self.ctx.os.is_windows()).then(|| RUN_PATH.to_string());
        let spec = LinkSpec {
            objects,
            output: output.clone(),
            libraries,
            library_dirs,
            runtime_library_dirs: target.runtime_library_dirs.clone(),
            extra_args,
            run_path,
            debug: self.options.debug,
        };
        self.toolchain
            .link_executable(&spec)
            .map_err(|e| BuildError::Link {
                target: target.name.clone(),
                message: e.0,
            })?;

        Ok(CompiledArtifact {
            target: target.name.clone(),
            kind: target.kind,
            path: output,
        })
    }

    fn compile(
        &self,
        target: &BuildTarget,
        sources: Vec<PathBuf>,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let spec = CompileSpec {
            sources,
            output_dir: self.options.build_temp.clone(),
            include_dirs: target.include_dirs.clone(),
            depends: target.depends.clone(),
            debug: self.options.debug,
        };
        self.toolchain
            .compile(&spec)
            .map_err(|e| BuildError::Compile {
                target: target.name.clone(),
                message: e.0,
            })
    }

    fn module_file_name(&self, target: &BuildTarget) -> Result<String, BuildError> {
        Ok(format!(
            "{}{}",
            target.name,
            self.ctx.runtime.module_suffix()?
        ))
    }
}
