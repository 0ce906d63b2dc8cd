//! Compilation snapshot written by the host bundler.
//!
//! The snapshot mirrors the parts of a finished compilation that the
//! reconciler needs: recorded file dependencies, emitted assets with their
//! disk location, and every chunk's modules with export usage metadata.
//! Export fields keep the bundler's overloaded `true`/`false`/array shape on
//! the wire and are turned into [`UsedExports`]/[`ProvidedExports`] here.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
    paths::{is_dependency_path, to_unix_path},
    types::{FileSet, ModuleExportUsage, ProvidedExports, UsedExports},
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
    /// Base directory the bundler resolved entries against
    pub context: Option<String>,

    /// Every file the bundler read while building
    #[serde(default)]
    pub file_dependencies: Vec<String>,

    /// Emitted assets keyed by asset name
    #[serde(default)]
    pub assets: IndexMap<String, Asset>,

    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Disk path the asset was emitted to
    pub exists_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Source file backing the module; absent for runtime/synthetic modules
    pub resource: Option<String>,

    pub used_exports: Option<RawExports>,

    pub provided_exports: Option<RawExports>,

    pub build_meta: Option<BuildMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BuildMeta {
    pub provided_exports: Option<RawExports>,
}

/// Export metadata exactly as the bundler serialized it.
///
/// `Other` swallows any unexpected shape so one odd module cannot fail the
/// whole snapshot load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawExports {
    Flag(bool),
    Names(Vec<String>),
    Other(serde_json::Value),
}

impl Compilation {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading compilation snapshot from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read compilation snapshot {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse compilation snapshot {}", path.display()))
    }

    pub fn parse(json: &str) -> Result<Self> {
        let compilation: Compilation = serde_json::from_str(json)?;
        debug!(
            "Snapshot has {} file dependencies, {} assets, {} chunks",
            compilation.file_dependencies.len(),
            compilation.assets.len(),
            compilation.chunks.len()
        );
        Ok(compilation)
    }

    /// Files the bundler depended on or emitted, outside package-manager directories
    pub fn compiled_file_set(&self) -> FileSet {
        let emitted = self.assets.values().filter_map(|asset| asset.exists_at.as_deref());

        let files: FileSet = self
            .file_dependencies
            .iter()
            .map(String::as_str)
            .chain(emitted)
            .map(to_unix_path)
            .filter(|path| !is_dependency_path(path))
            .collect();

        debug!("Compiled file set has {} files", files.len());
        files
    }

    /// All modules of all chunks, in chunk order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.chunks.iter().flat_map(|chunk| chunk.modules.iter())
    }

    /// Usage records for every module whose metadata can be reasoned about
    pub fn export_usages(&self) -> Vec<ModuleExportUsage> {
        let mut usages = Vec::new();
        for module in self.modules() {
            let Some(path) = module.resource_path() else {
                trace!("Skipping module without resource");
                continue;
            };
            let Some(provided) = module.provided_exports() else {
                trace!("Skipping {}: no provided exports", path);
                continue;
            };
            let Some(used) = module.used_exports() else {
                trace!("Skipping {}: no used exports", path);
                continue;
            };
            usages.push(ModuleExportUsage { path, provided, used });
        }
        debug!("Collected export usage for {} modules", usages.len());
        usages
    }
}

impl Module {
    pub fn resource_path(&self) -> Option<String> {
        self.resource.as_deref().filter(|r| !r.is_empty()).map(to_unix_path)
    }

    pub fn used_exports(&self) -> Option<UsedExports> {
        match self.used_exports.as_ref()? {
            RawExports::Flag(true) => Some(UsedExports::AllUsed),
            RawExports::Flag(false) => Some(UsedExports::NoneUsed),
            RawExports::Names(names) => Some(UsedExports::Partial(names.clone())),
            RawExports::Other(value) => {
                warn!("Ignoring malformed usedExports on {:?}: {}", self.resource, value);
                None
            }
        }
    }

    /// Provided exports, falling back to the build metadata when the module
    /// itself reports none
    pub fn provided_exports(&self) -> Option<ProvidedExports> {
        let raw = match &self.provided_exports {
            None | Some(RawExports::Flag(false)) => {
                self.build_meta.as_ref().and_then(|meta| meta.provided_exports.as_ref())?
            }
            Some(raw) => raw,
        };
        match raw {
            RawExports::Flag(true) => Some(ProvidedExports::Unknown),
            RawExports::Names(names) => Some(ProvidedExports::Known(names.clone())),
            RawExports::Flag(false) => None,
            RawExports::Other(value) => {
                warn!("Ignoring malformed providedExports on {:?}: {}", self.resource, value);
                None
            }
        }
    }
}
