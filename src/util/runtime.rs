use std::env;
use std::path::Path;

/// Base name of the running executable.
pub fn program() -> String {
    env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}

/// Command line arguments, starting with the base program name.
pub fn args() -> Vec<String> {
    std::iter::once(program())
        .chain(env::args().skip(1))
        .collect()
}

/// Package version of the crate invoking the macro.
///
/// ```
/// let version = cmdset::build_version!();
/// assert!(!version.is_empty());
/// ```
#[macro_export]
macro_rules! build_version {
    () => {
        env!("CARGO_PKG_VERSION")
    };
}

/// Fill `version` from `build` iff it is empty.
///
/// Lets a version injected at build time (e.g. via `option_env!`) take
/// precedence over the package version.
pub fn fix_version(version: &mut String, build: &str) {
    if version.is_empty() {
        version.push_str(build);
    }
}
