use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, info, trace};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{config::Config, prompt::Prompter};

const DELETE_QUESTION: &str = "delete all unused files?";
const OUTPUT_QUESTION: &str = "output path of unused files?";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    pub deleted: Vec<String>,
    /// Files that were already gone when their turn came
    pub missing: Vec<String>,
}

/// What the operator agreed to and what was done
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractiveOutcome {
    pub deletion: Option<DeletionOutcome>,
    pub report_path: Option<PathBuf>,
}

/// Delete the first `limit` files (all of them when `limit` is `None`).
///
/// Stops at the first failed deletion; files removed before it stay removed.
pub fn delete_files(files: &[String], limit: Option<usize>) -> Result<DeletionOutcome> {
    let scope = limit.unwrap_or(files.len()).min(files.len());
    debug!("Deleting {} of {} unused files", scope, files.len());

    let mut outcome = DeletionOutcome::default();
    for file in &files[..scope] {
        let path = Path::new(file);
        if !path.exists() {
            trace!("Already gone: {}", file);
            outcome.missing.push(file.clone());
            continue;
        }
        fs::remove_file(path).with_context(|| format!("Failed to delete {}", file))?;
        trace!("Deleted {}", file);
        outcome.deleted.push(file.clone());
    }
    Ok(outcome)
}

/// Write the full list of unused files as a JSON array of strings
pub fn write_unused_files_report(path: &Path, files: &[String]) -> Result<()> {
    debug!("Writing {} unused files to {}", files.len(), path.display());
    let json = serde_json::to_string(files)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Ask whether to delete the unused files and whether to write them to the
/// output file, then do what was confirmed.
///
/// Both questions are asked before anything is touched.
pub fn handle_unused_files<P: Prompter, W: Write>(
    prompter: &mut P,
    writer: &mut W,
    files: &[String],
    cfg: &Config,
) -> Result<InteractiveOutcome> {
    let delete = prompter.confirm(DELETE_QUESTION, true)?;
    let output = prompter.confirm(OUTPUT_QUESTION, true)?;
    debug!("Operator answers: delete={}, output={}", delete, output);

    let mut outcome = InteractiveOutcome::default();

    if delete {
        let deletion = delete_files(files, cfg.delete_limit)?;
        info!(
            "Deleted {} files ({} already missing)",
            deletion.deleted.len(),
            deletion.missing.len()
        );
        writeln!(
            writer,
            "{}",
            format!("Deleted {} unused files successfully.", deletion.deleted.len()).green()
        )?;
        if !deletion.missing.is_empty() {
            writeln!(
                writer,
                "{}",
                format!("{} files were already missing.", deletion.missing.len()).yellow()
            )?;
        }
        let skipped = files.len() - deletion.deleted.len() - deletion.missing.len();
        if skipped > 0 {
            writeln!(writer, "{}", format!("{} files kept by --delete-limit.", skipped).yellow())?;
        }
        outcome.deletion = Some(deletion);
    }

    if output {
        write_unused_files_report(&cfg.output_file, files)?;
        writeln!(writer, "{}", format!("Output file: {}", cfg.output_file.display()).green())?;
        outcome.report_path = Some(cfg.output_file.clone());
    }

    writer.flush()?;
    Ok(outcome)
}
