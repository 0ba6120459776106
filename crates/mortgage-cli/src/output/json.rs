use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the command result to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        tracing::error!(error = %e, "failed to write JSON output");
    }
}

/// Pretty JSON followed by a newline, so piped output ends cleanly.
fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}
