use anyhow::{Context, Result, anyhow};
use ignore::{WalkBuilder, overrides::OverrideBuilder};
use log::{debug, trace, warn};
use std::{
    io,
    path::{Path, PathBuf},
};

use crate::{
    paths::{absolutize, to_unix_path},
    types::FileSet,
};

pub struct CollectorConfig {
    /// Absolute directory the globs are rooted at
    pub context: PathBuf,
    pub patterns: Vec<String>,
    pub exclude: Vec<String>,
}

/// Expand `patterns` minus `exclude` under the context into the included file set.
///
/// Every glob is rooted at the context: `*.js` only matches files directly in
/// it, `./src/**` and `src/**` are the same, and absolute globs must point
/// inside the context. Entries come back in walk order, sorted by file name
/// within each directory. Symlinks are followed. Hidden entries and everything
/// below them are skipped, `.gitignore` rules are not consulted, and paths that
/// are not valid UTF-8 are left out with a warning.
pub fn collect_included_files(cfg: &CollectorConfig) -> Result<FileSet> {
    let context = &cfg.context;
    debug!("Collecting included files under {}", context.display());

    if cfg.patterns.is_empty() {
        debug!("No include patterns configured");
        return Ok(FileSet::new());
    }

    let mut overrides = OverrideBuilder::new(context);
    for pattern in &cfg.patterns {
        let glob = anchor_pattern(pattern, context)?;
        trace!("Include glob: '{}'", glob);
        overrides
            .add(&glob)
            .with_context(|| format!("Invalid include pattern '{}'", pattern))?;
    }
    for pattern in &cfg.exclude {
        let glob = format!("!{}", anchor_pattern(pattern, context)?);
        trace!("Exclude glob: '{}'", glob);
        overrides
            .add(&glob)
            .with_context(|| format!("Invalid exclude pattern '{}'", pattern))?;
    }
    let overrides = overrides.build().context("Failed to build glob matcher")?;

    let walker = WalkBuilder::new(context)
        .standard_filters(false)
        .follow_links(true)
        .overrides(overrides)
        .filter_entry(|dent| {
            dent.depth() == 0 || !dent.file_name().to_string_lossy().starts_with('.')
        })
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = FileSet::new();
    for res in walker {
        let dent = match res {
            Ok(dent) => dent,
            Err(err) if is_dangling(&err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if !dent.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(path) = dent.path().to_str() else {
            warn!("Skipping path that is not valid UTF-8: {}", dent.path().display());
            continue;
        };
        let path = to_unix_path(path);
        trace!("Matched file: {}", path);
        files.insert(path);
    }

    debug!("Collected {} included files", files.len());
    Ok(files)
}

/// Turn a pattern into a gitignore glob anchored at the context root.
///
/// Relative patterns are resolved against the context the way a path would be
/// (`./` and `..` folded), then re-expressed relative to it with a leading `/`.
fn anchor_pattern(pattern: &str, context: &Path) -> Result<String> {
    let context_str = context
        .to_str()
        .ok_or_else(|| anyhow!("Context {} is not valid UTF-8", context.display()))?;
    let prefix = to_unix_path(context_str);
    let prefix = prefix.trim_end_matches('/');

    let resolved = absolutize(Path::new(&to_unix_path(pattern)), context);
    let resolved = to_unix_path(&resolved.to_string_lossy());

    resolved
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
        .map(|rest| format!("/{}", rest))
        .ok_or_else(|| anyhow!("Pattern '{}' does not point inside the context {}", pattern, prefix))
}

/// Broken symlinks and symlink loops are skipped rather than failing the walk
fn is_dangling(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::Io(io_err) => io_err.kind() == io::ErrorKind::NotFound,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_dangling(err),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn config(root: &Path, patterns: &[&str], exclude: &[&str]) -> CollectorConfig {
        CollectorConfig {
            context: root.to_path_buf(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            exclude: exclude.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn relative(root: &Path, files: &FileSet) -> Vec<String> {
        let prefix = format!("{}/", to_unix_path(&root.to_string_lossy()));
        files.iter().map(|f| f.strip_prefix(&prefix).unwrap_or(f).to_string()).collect()
    }

    #[test]
    fn test_collect_matches_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "export const a = 1;");
        create_test_file(root, "src/b.ts", "export const b = 1;");
        create_test_file(root, "README.md", "# readme");

        let files = collect_included_files(&config(root, &["src/**/*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
    }

    #[test]
    fn test_collect_applies_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");
        create_test_file(root, "src/a.test.js", "");
        create_test_file(root, "node_modules/react/index.js", "");

        let files =
            collect_included_files(&config(root, &["**/*.js"], &["node_modules", "**/*.test.js"]))
                .unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
    }

    #[test]
    fn test_collect_order_is_sorted_walk_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/c.js", "");
        create_test_file(root, "src/a.js", "");
        create_test_file(root, "src/b.js", "");

        let files = collect_included_files(&config(root, &["**/*.*"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js", "src/b.js", "src/c.js"]);
    }

    #[test]
    fn test_collect_returns_absolute_unix_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");

        let files = collect_included_files(&config(root, &["**/*.*"], &[])).unwrap();
        let expected = to_unix_path(&root.join("src").join("a.js").to_string_lossy());
        assert!(files.contains(&expected));
    }

    #[test]
    fn test_collect_rebases_absolute_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");
        create_test_file(root, "lib/b.js", "");

        let absolute = format!("{}/src/**/*.js", to_unix_path(&root.to_string_lossy()));
        let files = collect_included_files(&config(root, &[&absolute], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
    }

    #[test]
    fn test_collect_without_patterns_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");

        let files = collect_included_files(&config(root, &[], &["node_modules"])).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_skips_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, ".eslintrc.js", "");
        create_test_file(root, ".cache/build.js", "");
        create_test_file(root, "src/a.js", "");

        let files = collect_included_files(&config(root, &["**/*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
    }

    #[test]
    fn test_collect_slashless_pattern_stays_at_context_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "index.js", "");
        create_test_file(root, "src/deep/x.js", "");

        let files = collect_included_files(&config(root, &["*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["index.js"]);
    }

    #[test]
    fn test_collect_dot_slash_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");
        create_test_file(root, "lib/b.js", "");

        let files = collect_included_files(&config(root, &["./src/**/*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
    }

    #[test]
    fn test_collect_rejects_patterns_outside_context() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("app");
        create_test_file(&root, "other/x.js", "");

        let outside = to_unix_path(&temp_dir.path().join("other/x.js").to_string_lossy());
        let err = collect_included_files(&config(&root, &[&outside], &[])).unwrap_err();
        assert!(err.to_string().contains("does not point inside the context"));

        assert!(collect_included_files(&config(&root, &["../other/*.js"], &[])).is_err());
    }

    #[test]
    fn test_collect_slashless_exclude_stays_at_context_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "a.test.js", "");
        create_test_file(root, "src/b.test.js", "");

        let files = collect_included_files(&config(root, &["**/*.js"], &["*.test.js"])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/b.test.js"]);
    }

    #[test]
    fn test_collect_excludes_nested_dependency_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "packages/ui/node_modules/react/index.js", "");
        create_test_file(root, "packages/ui/src/button.js", "");

        let files =
            collect_included_files(&config(root, &["**/*.js"], &["**/node_modules"])).unwrap();
        assert_eq!(relative(root, &files), vec!["packages/ui/src/button.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_follows_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "shared/util.js", "");
        create_test_file(root, "src/a.js", "");
        std::os::unix::fs::symlink(root.join("shared"), root.join("src/linked")).unwrap();

        let files = collect_included_files(&config(root, &["src/**/*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js", "src/linked/util.js"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_broken_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");
        std::os::unix::fs::symlink(root.join("missing.js"), root.join("src/b.js")).unwrap();

        let files = collect_included_files(&config(root, &["src/**/*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_collect_skips_non_utf8_paths() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/a.js", "");
        fs::write(root.join("src").join(OsStr::from_bytes(b"bad\xff.js")), "").unwrap();

        let files = collect_included_files(&config(root, &["src/**/*.js"], &[])).unwrap();
        assert_eq!(relative(root, &files), vec!["src/a.js"]);
        assert!(files.iter().all(|f| !f.contains('\u{FFFD}')));
    }

    #[test]
    fn test_anchor_pattern() {
        let context = Path::new("/proj");
        assert_eq!(anchor_pattern("/proj/src/**/*.js", context).unwrap(), "/src/**/*.js");
        assert_eq!(anchor_pattern("src/**/*.js", context).unwrap(), "/src/**/*.js");
        assert_eq!(anchor_pattern("./src/*.js", context).unwrap(), "/src/*.js");
        assert_eq!(anchor_pattern("*.js", context).unwrap(), "/*.js");
        assert_eq!(anchor_pattern("**/node_modules", context).unwrap(), "/**/node_modules");
        assert!(anchor_pattern("/project/x.js", context).is_err());
        assert!(anchor_pattern("/other/x.js", context).is_err());
        assert!(anchor_pattern(".", context).is_err());
    }
}
