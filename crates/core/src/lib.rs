//! frost-core: build pipeline for the frost launcher executables
//!
//! This crate drives the compile/link pipeline that produces the native
//! launcher binaries and the utility module, and post-processes the RPM and
//! MSI packaging artifacts so the produced files carry correct linkage and
//! version-qualified names.

mod context;
mod error;
mod linkage;
mod msi;
mod naming;
mod orchestrator;
mod rpm;
mod target;
mod toolchain;

pub use context::BuildContext;
pub use error::BuildError;
pub use linkage::{Linkage, resolve_linkage};
pub use msi::{REMOVE_FILE_TABLE, RemovalRule, remove_file_table, removal_rules, write_remove_file_table};
pub use naming::executable_name;
pub use orchestrator::{BuildOptions, CompiledArtifact, Orchestrator};
pub use rpm::{patch_spec, query_package_name, rename_package, versioned_file_name};
pub use target::{BuildTarget, LoggingLibs, TargetKind, default_targets, find_logging_libs};
pub use toolchain::{CcToolchain, CompileSpec, LinkSpec, Toolchain, ToolchainError};

/// Result type for build operations
pub type Result<T> = std::result::Result<T, BuildError>;
