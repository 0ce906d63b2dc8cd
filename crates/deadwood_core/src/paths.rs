use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::constants::DEPENDENCY_DIRS;

/// Replace every run of backslashes with a single forward slash.
///
/// Bundlers on Windows report `C:\\proj\\src\\a.js` while globs always yield
/// forward slashes; both sides go through this before they are compared.
pub fn to_unix_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut in_run = false;
    for ch in path.chars() {
        if ch == '\\' {
            if !in_run {
                out.push('/');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// True when any `/`-separated segment of a normalized path is a package-manager directory
pub fn is_dependency_path(path: &str) -> bool {
    path.split('/').any(|segment| DEPENDENCY_DIRS.contains(&segment))
}

/// Make `path` absolute against `base` and fold away `.` and `..` segments
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() { clean(path) } else { clean(base.join(path)) }
}
