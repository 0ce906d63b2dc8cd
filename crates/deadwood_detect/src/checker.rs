use anyhow::Result;
use deadwood_core::{
    Compilation, CollectorConfig, collect_included_files, compute_unused_export_map,
    compute_unused_files,
};
use log::{debug, info};

use crate::{config::Config, types::DetectionResult};

/// Compute unused files and unused exports for an already loaded compilation.
///
/// The config must be initialized. Disabled detections yield empty results and
/// the filesystem is only walked when at least one detection is enabled.
pub fn detect_dead_code(compilation: &Compilation, cfg: &Config) -> Result<DetectionResult> {
    if !cfg.detect_unused_files && !cfg.detect_unused_export {
        info!("Both detections disabled, nothing to do");
        return Ok(DetectionResult::default());
    }

    let context = cfg.context()?;
    debug!("Patterns: {:?}, exclude: {:?}", cfg.patterns, cfg.exclude);
    let included = collect_included_files(&CollectorConfig {
        context: context.clone(),
        patterns: cfg.patterns.clone(),
        exclude: cfg.exclude.clone(),
    })?;
    info!("Found {} included files", included.len());

    let unused_files = if cfg.detect_unused_files {
        let compiled = compilation.compiled_file_set();
        compute_unused_files(&compiled, &included)
    } else {
        Vec::new()
    };

    let (unused_exports, modules_scanned) = if cfg.detect_unused_export {
        let usages = compilation.export_usages();
        (compute_unused_export_map(&included, &usages), usages.len())
    } else {
        Default::default()
    };

    let result = DetectionResult {
        unused_files,
        unused_exports,
        files_included: included.len(),
        modules_scanned,
    };
    info!(
        "Dead code check complete. Found {} unused files and {} unused exports",
        result.unused_files.len(),
        result.unused_export_count()
    );
    Ok(result)
}
