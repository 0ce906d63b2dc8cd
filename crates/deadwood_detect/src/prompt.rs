//! Yes/no confirmation before the run touches the filesystem.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use log::{debug, trace};

pub trait Prompter {
    /// Ask a yes/no question; `default` is taken on an empty answer
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool>;
}

/// Line-based prompt over any reader/writer pair, usually stdin and stdout.
///
/// End of input counts as "no", whatever the default, so a closed stdin never
/// deletes anything.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            write!(self.writer, "{} {} {} ", "?".cyan().bold(), message.bold(), hint.dimmed())?;
            self.writer.flush()?;

            let mut input = String::new();
            if self.reader.read_line(&mut input)? == 0 {
                debug!("Input closed while asking '{}'", message);
                writeln!(self.writer)?;
                return Ok(false);
            }
            trace!("Answer to '{}': {:?}", message, input.trim());

            match input.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.writer, "{}", "Please answer yes or no.".yellow())?,
            }
        }
    }
}

/// Answers every question the same way without asking
pub struct PresetAnswer(pub bool);

impl Prompter for PresetAnswer {
    fn confirm(&mut self, message: &str, _default: bool) -> io::Result<bool> {
        debug!("Answering '{}' with {}", message, self.0);
        Ok(self.0)
    }
}
