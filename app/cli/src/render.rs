//! FILENAME: app/cli/src/render.rs
// PURPOSE: Text rendering of results and pipeline stages.

use std::io::Write;

use calc_engine::Evaluation;
use calc_parser::Token;

/// Results always print as floating point: `13.0`, not `13`.
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

pub fn format_tokens(tokens: &[Token]) -> String {
    let parts: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Writes the tokens, the tree and the result in labelled sections.
pub fn write_verbose<W: Write>(
    out: &mut W,
    expression: &str,
    evaluation: &Evaluation,
) -> std::io::Result<()> {
    writeln!(out, "\n=== TOKENIZATION ===")?;
    writeln!(out, "Input: {}", expression)?;
    writeln!(out, "Tokens: {}", format_tokens(&evaluation.tokens))?;

    writeln!(out, "\n=== PARSING ===")?;
    writeln!(out, "AST: {}", evaluation.ast)?;

    writeln!(out, "\n=== EVALUATION ===")?;
    writeln!(out, "Result: {}", format_value(evaluation.value))?;
    Ok(())
}
