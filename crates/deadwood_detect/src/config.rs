use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser};
use deadwood_core::{Compilation, absolutize};
use log::{debug, info};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "detect")]
#[command(about = "Report source files and exports a finished bundle never used")]
pub struct Config {
    /// Compilation snapshot written by the bundler
    #[arg(long)]
    pub compilation: PathBuf,

    /// Directory the globs are rooted at (defaults to the snapshot context, then cwd)
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Glob of files to check, relative to the context (repeatable)
    #[arg(long = "pattern", default_value = "**/*.*")]
    pub patterns: Vec<String>,

    /// Glob of files to leave out (repeatable)
    #[arg(long = "exclude", default_value = "**/node_modules")]
    pub exclude: Vec<String>,

    /// Report files the bundle never pulled in
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub detect_unused_files: bool,

    /// Report exports nothing imports
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub detect_unused_export: bool,

    /// Exit with status 2 when anything unused is found
    #[arg(long)]
    pub fail_on_hint: bool,

    /// Where the JSON list of unused files is written
    #[arg(long, default_value = "deadcode.json")]
    pub output_file: PathBuf,

    /// Delete at most this many unused files when deletion is confirmed
    #[arg(long)]
    pub delete_limit: Option<usize>,

    /// Answer yes to every prompt
    #[arg(long, conflicts_with = "no_input")]
    pub yes: bool,

    /// Answer no to every prompt
    #[arg(long)]
    pub no_input: bool,
}

impl Config {
    /// Resolve the context directory: the flag, then the snapshot's own
    /// context, then the current directory. The result is absolute.
    pub fn initialize(&mut self, compilation: &Compilation) -> Result<()> {
        let cwd = env::current_dir()?;
        let context = if let Some(c) = self.context.take() {
            debug!("Using provided context: {:?}", c);
            c
        } else if let Some(c) = compilation.context.as_deref().filter(|c| !c.is_empty()) {
            debug!("Using snapshot context: {}", c);
            PathBuf::from(c)
        } else {
            debug!("No context provided, using current directory");
            cwd.clone()
        };
        let context = absolutize(&context, &cwd);
        info!("Using context directory: {}", context.display());

        self.context = Some(context);
        Ok(())
    }

    /// Get the context directory, returning an error if not initialized
    pub fn context(&self) -> Result<&PathBuf> {
        self.context
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// Fixed answer for every prompt, if one was requested on the command line
    pub fn preset_answer(&self) -> Option<bool> {
        if self.yes {
            Some(true)
        } else if self.no_input {
            Some(false)
        } else {
            None
        }
    }
}
