use anyhow::Result;
use deadwood_core::Compilation;
use log::{debug, info};
use std::io::Write;

use crate::{
    actions::{InteractiveOutcome, handle_unused_files},
    checker::detect_dead_code,
    config::Config,
    prompt::Prompter,
    reporter::{print_unused_exports, print_unused_files},
    types::DetectionResult,
};

/// Exit status when `--fail-on-hint` is set and something unused was found
pub const FAIL_ON_HINT_EXIT_CODE: i32 = 2;

/// How a run ends once both result sets are known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Findings with `fail_on_hint`: stop before any prompt
    FailOnHint,
    /// Unused files to offer for deletion and export
    Interactive,
    Done,
}

impl RunOutcome {
    pub fn decide(result: &DetectionResult, cfg: &Config) -> Self {
        if cfg.fail_on_hint && result.has_findings() {
            RunOutcome::FailOnHint
        } else if cfg.detect_unused_files && !result.unused_files.is_empty() {
            RunOutcome::Interactive
        } else {
            RunOutcome::Done
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::FailOnHint => FAIL_ON_HINT_EXIT_CODE,
            RunOutcome::Interactive | RunOutcome::Done => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub result: DetectionResult,
    pub outcome: RunOutcome,
    /// Present only when the interactive phase ran
    pub interactive: Option<InteractiveOutcome>,
}

impl RunReport {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

/// Load the snapshot named in the config, resolve the context, then [`execute`].
pub fn run_dead_code_check<P: Prompter, W: Write>(
    cfg: &mut Config,
    prompter: &mut P,
    writer: &mut W,
) -> Result<RunReport> {
    info!("Starting dead code check");
    let compilation = Compilation::from_file(&cfg.compilation)?;
    cfg.initialize(&compilation)?;
    debug!("Config: {:?}", cfg);
    execute(&compilation, cfg, prompter, writer)
}

/// Compute, report, decide, then run the interactive phase if it applies.
///
/// Never exits the process; the caller turns [`RunReport::exit_code`] into a
/// process status.
pub fn execute<P: Prompter, W: Write>(
    compilation: &Compilation,
    cfg: &Config,
    prompter: &mut P,
    writer: &mut W,
) -> Result<RunReport> {
    let result = detect_dead_code(compilation, cfg)?;

    if cfg.detect_unused_export {
        print_unused_exports(writer, &result.unused_exports)?;
    }
    if cfg.detect_unused_files {
        print_unused_files(writer, &result.unused_files)?;
    }

    let outcome = RunOutcome::decide(&result, cfg);
    debug!("Run outcome: {:?}", outcome);

    let interactive = match outcome {
        RunOutcome::FailOnHint => {
            info!("Unused code found and fail-on-hint is set");
            None
        }
        RunOutcome::Interactive => {
            Some(handle_unused_files(prompter, writer, &result.unused_files, cfg)?)
        }
        RunOutcome::Done => None,
    };

    Ok(RunReport { result, outcome, interactive })
}
