//! FILENAME: app/cli/src/main.rs
// PURPOSE: Command-line entry point.
// FORMAT: result on stdout, errors on stderr, log lines as seq|level|category|message

fn main() -> std::process::ExitCode {
    cli_lib::run()
}
