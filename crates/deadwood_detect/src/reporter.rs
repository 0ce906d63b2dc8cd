use std::io::{self, Write};

use colored::Colorize;
use deadwood_core::UnusedExportMap;
use log::debug;

use crate::types::DetectionResult;

const UNUSED_FILES_HEADER: &str = "--------------------- Unused Files ---------------------";
const UNUSED_EXPORTS_HEADER: &str = "--------------------- Unused Exports ---------------------";

fn print_nothing_to_do<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "\n{} {}", "✓".green().bold(), "Perfect, there is nothing to do.".green())
}

pub fn print_unused_files<W: Write>(writer: &mut W, files: &[String]) -> io::Result<()> {
    debug!("Printing {} unused files", files.len());
    writeln!(writer, "\n{}", UNUSED_FILES_HEADER.yellow())?;

    if files.is_empty() {
        print_nothing_to_do(writer)?;
    } else {
        for file in files {
            writeln!(writer, "\n{}", file.yellow())?;
        }
        writeln!(
            writer,
            "\n{} {}",
            "⚠".yellow().bold(),
            format!("There are {} unused files.", files.len()).yellow()
        )?;
        writeln!(writer, "\n{}\n", "Please be careful if you want to remove them.".red().bold())?;
    }

    writer.flush()?;
    Ok(())
}

pub fn print_unused_exports<W: Write>(
    writer: &mut W,
    unused_exports: &UnusedExportMap,
) -> io::Result<()> {
    debug!("Printing unused exports for {} modules", unused_exports.len());
    writeln!(writer, "\n{}", UNUSED_EXPORTS_HEADER.yellow())?;

    if unused_exports.is_empty() {
        print_nothing_to_do(writer)?;
    } else {
        let mut total = 0;
        for (module_path, names) in unused_exports {
            writeln!(writer, "\n{}", module_path.yellow())?;
            writeln!(writer, "    {}   {}", "⟶".dimmed(), names.join(", ").yellow())?;
            total += names.len();
        }
        writeln!(
            writer,
            "\n{} {}\n",
            "⚠".yellow().bold(),
            format!("There are {} unused exports.", total).yellow()
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Timing line printed once a run is over
pub fn print_finished<W: Write>(
    writer: &mut W,
    result: &DetectionResult,
    elapsed_ms: u128,
) -> io::Result<()> {
    writeln!(
        writer,
        "\n{} Finished in {}ms on {} files and {} modules.",
        "●".bright_blue(),
        elapsed_ms.to_string().cyan(),
        result.files_included.to_string().cyan(),
        result.modules_scanned.to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}
