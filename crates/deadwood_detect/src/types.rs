use deadwood_core::UnusedExportMap;

#[derive(Debug, Clone, Default)]
pub struct DetectionResult {
    /// Included files the bundle never touched, in glob order
    pub unused_files: Vec<String>,
    pub unused_exports: UnusedExportMap,
    pub files_included: usize,
    pub modules_scanned: usize,
}

impl DetectionResult {
    pub fn has_findings(&self) -> bool {
        !self.unused_files.is_empty() || !self.unused_exports.is_empty()
    }

    /// Number of unused symbols across all modules
    pub fn unused_export_count(&self) -> usize {
        self.unused_exports.values().map(Vec::len).sum()
    }
}
