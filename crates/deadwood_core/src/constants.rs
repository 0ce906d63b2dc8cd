//! Directory names owned by JavaScript package managers.
//!
//! Any path with one of these as a segment belongs to a third-party package and
//! is left out of both the compiled file set and the unused export scan.

/// Package-manager install directories (matched as whole path segments)
pub const DEPENDENCY_DIRS: &[&str] = &[
    "node_modules",     // npm, yarn, pnpm
    "bower_components", // bower
    "jspm_packages",    // jspm
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_dirs_includes_node_modules() {
        assert!(DEPENDENCY_DIRS.contains(&"node_modules"));
    }

    #[test]
    fn test_dependency_dirs_are_plain_segments() {
        for dir in DEPENDENCY_DIRS {
            assert!(!dir.contains('/'), "'{}' should be a single path segment", dir);
            assert!(!dir.contains('\\'), "'{}' should be a single path segment", dir);
        }
    }
}
