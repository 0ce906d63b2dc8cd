use log::{debug, trace};
use std::collections::HashSet;

use crate::{
    paths::is_dependency_path,
    types::{FileSet, ModuleExportUsage, ProvidedExports, UnusedExportMap, UsedExports},
};

/// Files matched by the globs that the bundler never touched, in glob order
pub fn compute_unused_files(compiled: &FileSet, included: &FileSet) -> Vec<String> {
    let unused: Vec<String> =
        included.iter().filter(|file| !compiled.contains(*file)).cloned().collect();
    debug!("{} of {} included files are unused", unused.len(), included.len());
    unused
}

/// Exported names that nothing imports, per included module.
///
/// Modules are visited in the order given. When a path shows up more than once
/// (a module shared by several chunks) it keeps its first position and the
/// value of its last recorded occurrence.
pub fn compute_unused_export_map(
    included: &FileSet,
    usages: &[ModuleExportUsage],
) -> UnusedExportMap {
    let mut unused_exports = UnusedExportMap::new();

    for usage in usages {
        let path = &usage.path;

        let provided = match (&usage.provided, &usage.used) {
            (ProvidedExports::Unknown, _) | (_, UsedExports::AllUsed) => {
                trace!("Skipping {}: usage not statically known", path);
                continue;
            }
            (ProvidedExports::Known(provided), _) => provided,
        };

        if !included.contains(path) || is_dependency_path(path) {
            trace!("Skipping {}: not an included source file", path);
            continue;
        }

        let unused: Vec<String> = match &usage.used {
            UsedExports::NoneUsed => provided.clone(),
            UsedExports::Partial(used) => {
                let used: HashSet<&str> = used.iter().map(String::as_str).collect();
                provided.iter().filter(|name| !used.contains(name.as_str())).cloned().collect()
            }
            UsedExports::AllUsed => continue,
        };

        if unused.is_empty() {
            trace!("All exports of {} are used", path);
            continue;
        }

        trace!("{} has {} unused exports", path, unused.len());
        unused_exports.insert(path.clone(), unused);
    }

    debug!("Found unused exports in {} modules", unused_exports.len());
    unused_exports
}
