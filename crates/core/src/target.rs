//! Build target declarations.
//!
//! Targets are declared once at process start and never change during a
//! build. The kind and the capability flags are explicit fields rather than
//! something inferred from the target's name, so a future target name can
//! never accidentally flip a target into a different build path.

use serde::Serialize;
use std::path::{Path, PathBuf};

use frost_platform::Os;

/// Whether a target is an ordinary loadable module or a standalone linked
/// launcher executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Module,
    Bootloader,
}

/// One declared build target
#[derive(Debug, Clone, Serialize)]
pub struct BuildTarget {
    pub name: String,
    pub kind: TargetKind,
    pub sources: Vec<PathBuf>,
    /// Extra files that invalidate a previous result (shared headers etc.);
    /// passed through to the toolchain unchanged
    pub depends: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    pub runtime_library_dirs: Vec<PathBuf>,
    pub libraries: Vec<String>,
    pub extra_link_args: Vec<String>,
    /// Request an administrator-execution-level manifest (MSVC only)
    pub requires_elevation: bool,
    /// Link for the windowed subsystem, suppressing console allocation
    pub is_windowed: bool,
}

impl BuildTarget {
    fn new(name: &str, kind: TargetKind, sources: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            sources: sources.iter().map(PathBuf::from).collect(),
            depends: Vec::new(),
            include_dirs: Vec::new(),
            library_dirs: Vec::new(),
            runtime_library_dirs: Vec::new(),
            libraries: Vec::new(),
            extra_link_args: Vec::new(),
            requires_elevation: false,
            is_windowed: false,
        }
    }

    pub fn module(name: &str, sources: &[&str]) -> Self {
        Self::new(name, TargetKind::Module, sources)
    }

    pub fn bootloader(name: &str, sources: &[&str]) -> Self {
        Self::new(name, TargetKind::Bootloader, sources)
    }

    pub fn with_depends(mut self, depends: &[&str]) -> Self {
        self.depends = depends.iter().map(PathBuf::from).collect();
        self
    }

    pub fn with_libraries(mut self, libraries: &[&str]) -> Self {
        self.libraries = libraries.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_include_dirs(mut self, dirs: &[PathBuf]) -> Self {
        self.include_dirs = dirs.to_vec();
        self
    }

    pub fn with_library_dirs(mut self, dirs: &[PathBuf]) -> Self {
        self.library_dirs = dirs.to_vec();
        self
    }

    pub fn elevated(mut self) -> Self {
        self.requires_elevation = true;
        self
    }

    pub fn windowed(mut self) -> Self {
        self.is_windowed = true;
        self
    }
}

/// Import libraries for the optional logging dependency of the service
/// launcher, discovered in a sibling checkout.
pub struct LoggingLibs {
    pub include_dir: PathBuf,
    pub library_dir: PathBuf,
}

/// Look for a `frost-logging` checkout next to `root` carrying a built
/// import library. The service launcher is only declared when one exists.
pub fn find_logging_libs(root: &Path) -> Option<LoggingLibs> {
    let logging_dir = root.parent()?.join("frost-logging");
    if !logging_dir.exists() {
        return None;
    }
    let library_dir = logging_dir.join("lib");
    if !library_dir.exists() {
        return None;
    }
    Some(LoggingLibs {
        include_dir: logging_dir,
        library_dir,
    })
}

/// The static target set for a platform: the utility module, the console
/// launcher, and on Windows the elevated, windowed and service variants.
pub fn default_targets(os: Os, root: &Path) -> Vec<BuildTarget> {
    let win_libraries: &[&str] = if os.is_windows() {
        &["imagehlp", "Shlwapi"]
    } else {
        &[]
    };
    let depends = ["source/bases/common.c"];

    let mut targets = vec![
        BuildTarget::module("util", &["source/util.c"]).with_libraries(win_libraries),
        BuildTarget::bootloader("console", &["source/bases/console.c"])
            .with_depends(&depends)
            .with_libraries(win_libraries),
    ];

    if os.is_windows() {
        let gui_libraries: Vec<&str> =
            win_libraries.iter().copied().chain(["user32"]).collect();
        targets.push(
            BuildTarget::bootloader("console-admin", &["source/bases/console.c"])
                .with_depends(&depends)
                .with_libraries(win_libraries)
                .elevated(),
        );
        targets.push(
            BuildTarget::bootloader("gui", &["source/bases/gui.c"])
                .with_depends(&depends)
                .with_libraries(&gui_libraries)
                .windowed(),
        );
        targets.push(
            BuildTarget::bootloader("gui-admin", &["source/bases/gui.c"])
                .with_depends(&depends)
                .with_libraries(&gui_libraries)
                .windowed()
                .elevated(),
        );
        if let Some(logging) = find_logging_libs(root) {
            let service_libraries: Vec<&str> = win_libraries
                .iter()
                .copied()
                .chain(["advapi32", "frost_logging"])
                .collect();
            targets.push(
                BuildTarget::bootloader("service", &["source/bases/service.c"])
                    .with_depends(&depends)
                    .with_libraries(&service_libraries)
                    .with_include_dirs(&[logging.include_dir])
                    .with_library_dirs(&[logging.library_dir]),
            );
        }
    }

    targets
}
