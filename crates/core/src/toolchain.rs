//! Compiler/linker toolchain abstraction.
//!
//! The toolchain is an external collaborator: it takes source files and
//! flags and either produces object files and linked binaries or fails with
//! diagnostic text. [`CcToolchain`] drives a cc-style driver through
//! `std::process::Command`; tests substitute their own [`Toolchain`]
//! implementations.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

use frost_platform::CompilerFamily;

/// Diagnostic text from a rejected toolchain invocation
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ToolchainError(pub String);

/// Inputs for compiling a batch of sources to objects
#[derive(Debug, Clone)]
pub struct CompileSpec {
    pub sources: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub include_dirs: Vec<PathBuf>,
    /// Invalidation hints, forwarded unchanged; this toolchain does not
    /// cache, so they carry no behavior here
    pub depends: Vec<PathBuf>,
    pub debug: bool,
}

/// Inputs for linking objects into an executable or loadable module
#[derive(Debug, Clone)]
pub struct LinkSpec {
    pub objects: Vec<PathBuf>,
    pub output: PathBuf,
    pub libraries: Vec<String>,
    pub library_dirs: Vec<PathBuf>,
    pub runtime_library_dirs: Vec<PathBuf>,
    pub extra_args: Vec<String>,
    /// Dynamic-linker run-path hint, applied to the linker's process
    /// environment only
    pub run_path: Option<String>,
    pub debug: bool,
}

pub trait Toolchain {
    fn compile(&self, spec: &CompileSpec) -> Result<Vec<PathBuf>, ToolchainError>;
    fn link_executable(&self, spec: &LinkSpec) -> Result<(), ToolchainError>;
    fn link_module(&self, spec: &LinkSpec) -> Result<(), ToolchainError>;
}

/// Toolchain backed by a cc-style compiler driver
pub struct CcToolchain {
    driver: String,
    family: CompilerFamily,
}

impl CcToolchain {
    pub fn new(family: CompilerFamily) -> Self {
        let driver = match family {
            CompilerFamily::Msvc => "cl".to_string(),
            CompilerFamily::Mingw => "gcc".to_string(),
            CompilerFamily::Unix => std::env::var("CC").unwrap_or_else(|_| "cc".to_string()),
        };
        Self { driver, family }
    }

    pub fn with_driver(driver: impl Into<String>, family: CompilerFamily) -> Self {
        Self {
            driver: driver.into(),
            family,
        }
    }

    fn object_path(&self, source: &Path, output_dir: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or(source.as_os_str());
        let ext = match self.family {
            CompilerFamily::Msvc => "obj",
            CompilerFamily::Mingw | CompilerFamily::Unix => "o",
        };
        output_dir.join(stem).with_extension(ext)
    }

    fn compile_one(
        &self,
        source: &Path,
        object: &Path,
        spec: &CompileSpec,
    ) -> Result<(), ToolchainError> {
        // Resource scripts go through the resource compiler, not the driver
        if source.extension().is_some_and(|e| e == "rc") {
            let mut cmd = Command::new("windres");
            cmd.arg(source).args(["-O", "coff", "-o"]).arg(object);
            return run(cmd, None);
        }

        let mut cmd = Command::new(&self.driver);
        match self.family {
            CompilerFamily::Msvc => {
                cmd.args(["/nologo", "/c"]).arg(source);
                cmd.arg(format!("/Fo{}", object.display()));
                for dir in &spec.include_dirs {
                    cmd.arg(format!("/I{}", dir.display()));
                }
                if spec.debug {
                    cmd.arg("/Zi");
                }
            }
            CompilerFamily::Mingw | CompilerFamily::Unix => {
                cmd.arg("-c").arg(source).arg("-o").arg(object);
                for dir in &spec.include_dirs {
                    cmd.arg("-I").arg(dir);
                }
                if spec.debug {
                    cmd.arg("-g");
                }
            }
        }
        run(cmd, None)
    }

    fn link(&self, spec: &LinkSpec, module: bool) -> Result<(), ToolchainError> {
        let mut cmd = Command::new(&self.driver);
        match self.family {
            CompilerFamily::Msvc => {
                cmd.arg("/nologo");
                if module {
                    cmd.arg("/LD");
                }
                cmd.args(&spec.objects);
                cmd.arg(format!("/Fe{}", spec.output.display()));
                cmd.arg("/link");
                for dir in &spec.library_dirs {
                    cmd.arg(format!("/LIBPATH:{}", dir.display()));
                }
                for lib in &spec.libraries {
                    cmd.arg(format!("{lib}.lib"));
                }
                cmd.args(&spec.extra_args);
            }
            CompilerFamily::Mingw | CompilerFamily::Unix => {
                if module {
                    cmd.arg("-shared");
                }
                cmd.args(&spec.objects);
                cmd.arg("-o").arg(&spec.output);
                for dir in &spec.library_dirs {
                    cmd.arg("-L").arg(dir);
                }
                for dir in &spec.runtime_library_dirs {
                    cmd.arg(format!("-Wl,-rpath,{}", dir.display()));
                }
                for lib in &spec.libraries {
                    cmd.arg(format!("-l{lib}"));
                }
                if spec.debug {
                    cmd.arg("-g");
                }
                cmd.args(&spec.extra_args);
            }
        }
        run(cmd, spec.run_path.as_deref())
    }
}

impl Toolchain for CcToolchain {
    fn compile(&self, spec: &CompileSpec) -> Result<Vec<PathBuf>, ToolchainError> {
        std::fs::create_dir_all(&spec.output_dir)
            .map_err(|e| ToolchainError(e.to_string()))?;
        let mut objects = Vec::with_capacity(spec.sources.len());
        for source in &spec.sources {
            let object = self.object_path(source, &spec.output_dir);
            self.compile_one(source, &object, spec)?;
            objects.push(object);
        }
        Ok(objects)
    }

    fn link_executable(&self, spec: &LinkSpec) -> Result<(), ToolchainError> {
        self.link(spec, false)
    }

    fn link_module(&self, spec: &LinkSpec) -> Result<(), ToolchainError> {
        self.link(spec, true)
    }
}

/// Run one toolchain command, surfacing its diagnostics on failure.
///
/// `run_path` is scoped to this child process; nothing in the build mutates
/// the orchestrator's own environment.
fn run(mut cmd: Command, run_path: Option<&str>) -> Result<(), ToolchainError> {
    if let Some(path) = run_path {
        cmd.env("LD_RUN_PATH", path);
    }
    debug!(command = ?cmd, "invoking toolchain");

    let output = cmd.output().map_err(|e| ToolchainError(e.to_string()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // MSVC writes diagnostics to stdout
        let message = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        return Err(ToolchainError(message));
    }
    Ok(())
}
