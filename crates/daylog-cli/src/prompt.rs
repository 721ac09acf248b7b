//! Yes/no confirmation prompts.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Prints `question` and reads one line from stdin. The first character
/// decides: `y`/`Y` is yes, `n`/`N` is no, anything else (including an
/// empty line or closed stdin) falls back to `default`.
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    print!("{question}");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(match line.trim_start().chars().next() {
        Some('y') | Some('Y') => true,
        Some('n') | Some('N') => false,
        _ => default,
    })
}
