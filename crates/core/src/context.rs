//! Build context shared by every target

use frost_platform::{CompilerFamily, Os, RuntimeVars};

/// Immutable per-build context: the platform being built on and the
/// configuration of the runtime being embedded.
///
/// Resolved once before the first target and never mutated during a build.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub os: Os,
    pub compiler: CompilerFamily,
    pub runtime: RuntimeVars,
}

impl BuildContext {
    pub fn new(os: Os, compiler: CompilerFamily, runtime: RuntimeVars) -> Self {
        Self {
            os,
            compiler,
            runtime,
        }
    }

    /// Context for the machine the build is running on
    pub fn current(runtime: RuntimeVars) -> Self {
        let os = Os::current();
        Self::new(os, CompilerFamily::detect(os), runtime)
    }
}
