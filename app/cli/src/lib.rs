//! FILENAME: app/cli/src/lib.rs
// PURPOSE: Command-line front end for the expression engine.
// CONTEXT: Parses arguments, installs logging, then either evaluates one
//          expression or starts the REPL. Rendering of results and errors
//          happens here; the engine only returns structured data.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use calc_engine::{run as run_expression, run_traced, EvaluationReport};
use clap::{CommandFactory, Parser};
use log::LevelFilter;

pub mod error;
pub mod logging;
pub mod render;
pub mod repl;

pub use error::CliError;
pub use logging::{get_log_path, init_log_file, next_seq, write_log};
pub use repl::Repl;

/// Evaluate arithmetic expressions with + - * / and parentheses.
#[derive(Parser, Debug)]
#[command(name = "calc", version, long_about = None)]
pub struct Cli {
    /// Start an interactive session
    #[arg(short, long, conflicts_with_all = ["expression", "json"])]
    pub interactive: bool,

    /// Show tokens, syntax tree and result
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a JSON report instead of plain text
    #[arg(long, conflicts_with = "verbose")]
    pub json: bool,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, env = "CALC_LOG", default_value = "warn")]
    pub log_level: LevelFilter,

    /// Write log lines to this file instead of stderr
    #[arg(long, env = "CALC_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Expression to evaluate; several words are joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub expression: Vec<String>,
}

/// Runs the front end against the given streams and returns the exit status.
pub fn execute<R: BufRead, W: Write, E: Write>(
    cli: &Cli,
    input: R,
    out: &mut W,
    err: &mut E,
) -> Result<u8, CliError> {
    log_enter!(
        "CLI",
        "execute",
        "interactive={} verbose={} json={}",
        cli.interactive,
        cli.verbose,
        cli.json
    );

    let status = if cli.interactive {
        Repl::new(cli.verbose).run(input, out)?;
        0
    } else if cli.expression.is_empty() {
        write!(out, "{}", Cli::command().render_help())?;
        0
    } else {
        evaluate_once(cli, &cli.expression.join(" "), out, err)?
    };

    log_exit!("CLI", "execute", "status={}", status);
    Ok(status)
}

fn evaluate_once<W: Write, E: Write>(
    cli: &Cli,
    expression: &str,
    out: &mut W,
    err: &mut E,
) -> Result<u8, CliError> {
    if cli.json {
        let report = EvaluationReport::from_result(expression, &run_expression(expression));
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(if report.is_success() { 0 } else { 1 });
    }

    let outcome = if cli.verbose {
        run_traced(expression).map(|evaluation| render::write_verbose(out, expression, &evaluation))
    } else {
        run_expression(expression).map(|value| writeln!(out, "{}", render::format_value(value)))
    };

    match outcome {
        Ok(written) => {
            written?;
            Ok(0)
        }
        Err(failure) => {
            log_info!("CLI", "{} failed: {}", failure.stage(), failure);
            writeln!(err, "Error: {}", failure)?;
            Ok(1)
        }
    }
}

/// Binary entry point.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level, cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    match execute(&cli, stdin.lock(), &mut stdout.lock(), &mut stderr.lock()) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            log_error!("CLI", "{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
