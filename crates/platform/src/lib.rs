//! Platform detection and runtime-build configuration for frost
//!
//! This crate provides:
//! - OS and compiler-family detection
//! - Read-only access to the variables recorded when the embedded Python
//!   runtime was compiled (link flags, library names, filename suffixes)

mod error;
mod platform;
mod runtime;

pub use error::PlatformError;
pub use platform::{CompilerFamily, Os};
pub use runtime::RuntimeVars;
