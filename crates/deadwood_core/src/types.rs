use indexmap::{IndexMap, IndexSet};

/// Ordered set of forward-slash-normalized absolute paths
pub type FileSet = IndexSet<String>;

/// Module path to the exported names nothing imports, in module enumeration order
pub type UnusedExportMap = IndexMap<String, Vec<String>>;

/// What the bundler knows about which exports of a module are referenced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsedExports {
    /// Everything may be used (`true` in the snapshot)
    AllUsed,
    /// Nothing is referenced (`false` in the snapshot)
    NoneUsed,
    Partial(Vec<String>),
}

/// What the bundler knows about the exports a module provides
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvidedExports {
    /// Exports cannot be determined statically (`true` in the snapshot)
    Unknown,
    Known(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleExportUsage {
    /// Normalized on-disk path of the module
    pub path: String,
    pub provided: ProvidedExports,
    pub used: UsedExports,
}
