//! Per-platform linkage policy.
//!
//! Pure function of (target, context) to the libraries, search paths and
//! extra linker arguments a launcher executable needs. The platform is
//! checked first, then the compiler family, then the target flags: MSVC and
//! MinGW linker flag syntax is mutually exclusive, and the non-Windows
//! branch assumes POSIX-style flag aggregation.

use std::path::PathBuf;

use frost_platform::{CompilerFamily, Os};

use crate::context::BuildContext;
use crate::error::BuildError;
use crate::target::BuildTarget;

/// Resolved linkage for one launcher executable
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linkage {
    pub libraries: Vec<String>,
    pub library_dirs: Vec<PathBuf>,
    pub extra_args: Vec<String>,
}

/// Resolve the library set and extra link arguments for `target`.
///
/// Deterministic: the same (target, context) always yields the same ordered
/// lists.
pub fn resolve_linkage(target: &BuildTarget, ctx: &BuildContext) -> Result<Linkage, BuildError> {
    let mut linkage = Linkage::default();

    if ctx.os.is_windows() {
        match ctx.compiler {
            CompilerFamily::Msvc => {
                linkage.extra_args.push("/MANIFEST".to_string());
                if target.requires_elevation {
                    linkage.extra_args.push(
                        "/MANIFESTUAC:level='requireAdministrator' uiAccess='false'".to_string(),
                    );
                }
            }
            CompilerFamily::Mingw if target.is_windowed => {
                linkage.extra_args.push("-mwindows".to_string());
            }
            _ => {}
        }
        return Ok(linkage);
    }

    let runtime = &ctx.runtime;
    linkage
        .library_dirs
        .push(PathBuf::from(runtime.library_search_path()?));
    linkage.libraries.push(runtime.runtime_library());

    // LINKFORSHARED carries flags macOS's linker rejects
    let link_for_shared = runtime.get("LINKFORSHARED");
    if !link_for_shared.is_empty() && ctx.os != Os::Darwin {
        linkage
            .extra_args
            .extend(link_for_shared.split_whitespace().map(String::from));
    }
    linkage
        .extra_args
        .extend(runtime.get("LIBS").split_whitespace().map(String::from));
    let libm = runtime.get("LIBM");
    if !libm.is_empty() {
        linkage.extra_args.push(libm.to_string());
    }
    for key in ["BASEMODLIBS", "LOCALMODLIBS"] {
        linkage
            .extra_args
            .extend(runtime.get(key).split_whitespace().map(String::from));
    }

    // Strip symbol information from the final binary
    linkage.extra_args.push("-s".to_string());

    Ok(linkage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frost_platform::RuntimeVars;
    use std::collections::BTreeMap;

    fn runtime(pairs: &[(&str, &str)]) -> RuntimeVars {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>();
        RuntimeVars::from_map(map, (3, 6), "m")
    }

    fn posix_runtime() -> RuntimeVars {
        runtime(&[
            ("LIBPL", "/usr/lib/python3.6/config-3.6m"),
            ("LINKFORSHARED", "-a -b"),
            ("LIBS", "-lc"),
            ("LIBM", "-lm"),
            ("BASEMODLIBS", ""),
            ("LOCALMODLIBS", "-ld"),
        ])
    }

    fn ctx(os: Os, compiler: CompilerFamily, runtime: RuntimeVars) -> BuildContext {
        BuildContext::new(os, compiler, runtime)
    }

    #[test]
    fn test_posix_arg_order() {
        let target = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(Os::Linux, CompilerFamily::Unix, posix_runtime());

        let linkage = resolve_linkage(&target, &ctx).unwrap();
        assert_eq!(linkage.extra_args, vec!["-a", "-b", "-lc", "-lm", "-ld", "-s"]);
        assert_eq!(linkage.libraries, vec!["python3.6m"]);
        assert_eq!(
            linkage.library_dirs,
            vec![PathBuf::from("/usr/lib/python3.6/config-3.6m")]
        );
    }

    #[test]
    fn test_darwin_suppresses_link_for_shared() {
        let target = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(Os::Darwin, CompilerFamily::Unix, posix_runtime());

        let linkage = resolve_linkage(&target, &ctx).unwrap();
        assert_eq!(linkage.extra_args, vec!["-lc", "-lm", "-ld", "-s"]);
    }

    #[test]
    fn test_posix_always_ends_with_strip_flag() {
        let target = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(
            Os::Linux,
            CompilerFamily::Unix,
            runtime(&[("LIBPL", "/cfg")]),
        );

        let linkage = resolve_linkage(&target, &ctx).unwrap();
        assert_eq!(linkage.extra_args, vec!["-s"]);
    }

    #[test]
    fn test_missing_library_search_path_is_an_error() {
        let target = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(Os::Linux, CompilerFamily::Unix, runtime(&[]));

        assert!(resolve_linkage(&target, &ctx).is_err());
    }

    #[test]
    fn test_msvc_manifest_and_elevation() {
        let target =
            BuildTarget::bootloader("console-admin", &["source/bases/console.c"]).elevated();
        let ctx = ctx(Os::Windows, CompilerFamily::Msvc, runtime(&[]));

        let linkage = resolve_linkage(&target, &ctx).unwrap();
        assert_eq!(
            linkage.extra_args,
            vec![
                "/MANIFEST",
                "/MANIFESTUAC:level='requireAdministrator' uiAccess='false'"
            ]
        );
        // No POSIX-style flags on the MSVC path
        assert!(linkage.extra_args.iter().all(|a| !a.starts_with('-')));
        assert!(linkage.libraries.is_empty());
    }

    #[test]
    fn test_msvc_without_elevation() {
        let target = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(Os::Windows, CompilerFamily::Msvc, runtime(&[]));

        let linkage = resolve_linkage(&target, &ctx).unwrap();
        assert_eq!(linkage.extra_args, vec!["/MANIFEST"]);
    }

    #[test]
    fn test_mingw_windowed_subsystem() {
        let windowed = BuildTarget::bootloader("gui", &["source/bases/gui.c"]).windowed();
        let console = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(Os::Windows, CompilerFamily::Mingw, runtime(&[]));

        assert_eq!(
            resolve_linkage(&windowed, &ctx).unwrap().extra_args,
            vec!["-mwindows"]
        );
        assert!(resolve_linkage(&console, &ctx).unwrap().extra_args.is_empty());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let target = BuildTarget::bootloader("console", &["source/bases/console.c"]);
        let ctx = ctx(Os::Linux, CompilerFamily::Unix, posix_runtime());

        let first = resolve_linkage(&target, &ctx).unwrap();
        let second = resolve_linkage(&target, &ctx).unwrap();
        assert_eq!(first, second);
    }
}
