//! FILENAME: app/cli/src/repl.rs
// PURPOSE: Interactive read-eval-print loop.
// CONTEXT: Every submitted line is an independent pipeline run. The only
//          state kept between lines is the verbose display flag.

use std::io::{BufRead, Write};

use calc_engine::{run, run_traced};

use crate::error::CliError;
use crate::render::{format_value, write_verbose};

pub const PROMPT: &str = ">>> ";

enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    verbose: bool,
}

impl Repl {
    pub fn new(verbose: bool) -> Self {
        Repl { verbose }
    }

    /// Reads lines until `quit`/`exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), CliError> {
        crate::log_enter!("REPL", "run", "verbose={}", self.verbose);

        writeln!(out, "Calculator - Interactive Mode")?;
        writeln!(out, "{}", "=".repeat(50))?;

        let mut lines = input.lines();
        let mut evaluated = 0usize;
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };

            match self.handle_line(line.trim(), out, &mut evaluated)? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
        }

        crate::log_exit!("REPL", "run", "evaluated={}", evaluated);
        Ok(())
    }

    fn handle_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        evaluated: &mut usize,
    ) -> Result<Flow, CliError> {
        match line.to_lowercase().as_str() {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" => {
                writeln!(out, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
            "verbose" => {
                self.verbose = !self.verbose;
                writeln!(
                    out,
                    "Verbose mode: {}",
                    if self.verbose { "ON" } else { "OFF" }
                )?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        *evaluated += 1;
        if self.verbose {
            match run_traced(line) {
                Ok(evaluation) => write_verbose(out, line, &evaluation)?,
                Err(failure) => {
                    crate::log_debug!("REPL", "{} failure: {}", failure.stage(), failure);
                    writeln!(out, "Error: {}", failure)?
                }
            }
        } else {
            match run(line) {
                Ok(value) => writeln!(out, "{}", format_value(value))?,
                Err(failure) => {
                    crate::log_debug!("REPL", "{} failure: {}", failure.stage(), failure);
                    writeln!(out, "Error: {}", failure)?
                }
            }
        }

        Ok(Flow::Continue)
    }
}
