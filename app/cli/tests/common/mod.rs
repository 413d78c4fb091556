//! FILENAME: tests/common/mod.rs
//! Test harness for calculator front-end integration tests.

#![allow(dead_code)]

use clap::Parser;
use cli_lib::{execute, Cli, Repl};

/// Captured result of one front-end invocation.
pub struct CliOutcome {
    pub status: u8,
    pub stdout: String,
    pub stderr: String,
}

/// Parse `args` (without the program name) and run them with empty stdin.
pub fn run_cli(args: &[&str]) -> CliOutcome {
    run_cli_with_input(args, "")
}

pub fn run_cli_with_input(args: &[&str], input: &str) -> CliOutcome {
    let argv = std::iter::once("calc").chain(args.iter().copied());
    let cli = Cli::try_parse_from(argv).expect("arguments should parse");

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let status = execute(&cli, input.as_bytes(), &mut stdout, &mut stderr)
        .expect("front end should not fail on in-memory streams");

    CliOutcome {
        status,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
    }
}

/// Feed `script` to a REPL and return everything it printed.
pub fn run_repl(script: &str, verbose: bool) -> String {
    let mut repl = Repl::new(verbose);
    let mut out = Vec::new();
    repl.run(script.as_bytes(), &mut out).expect("repl should not fail");
    String::from_utf8(out).unwrap()
}

/// Printed lines with the banner removed and prompts stripped.
pub fn repl_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .skip(2)
        .map(|line| line.replace(cli_lib::repl::PROMPT, ""))
        .filter(|line| !line.is_empty())
        .collect()
}
