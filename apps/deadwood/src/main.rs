use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use deadwood_detect::{Config, PresetAnswer, TerminalPrompter, run_dead_code_check};
use log::{debug, info};
use std::io::{self, BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "deadwood")]
#[command(about = "Find files and exports a finished bundle never used", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report unused files and unused exports from a compilation snapshot
    Detect(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Detect(mut cfg) => {
            let report = match cfg.preset_answer() {
                Some(answer) => {
                    run_dead_code_check(&mut cfg, &mut PresetAnswer(answer), &mut stdout)?
                }
                None => {
                    let mut prompter = TerminalPrompter::new(io::stdin().lock(), io::stdout());
                    run_dead_code_check(&mut cfg, &mut prompter, &mut stdout)?
                }
            };

            let elapsed_ms = start.elapsed().as_millis();
            deadwood_detect::print_finished(&mut stdout, &report.result, elapsed_ms)?;

            let code = report.exit_code();
            if code != 0 {
                writeln!(
                    stdout,
                    "{} Unused code found, failing because of --fail-on-hint.",
                    "✗".red().bold()
                )?;
                stdout.flush()?;
                // Non-zero exit to fail CI
                std::process::exit(code);
            }

            info!("Done");
            stdout.flush()?;
            Ok(())
        }
    }
}
