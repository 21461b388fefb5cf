//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for prompts
//! - **Standardized spacing**: Newline before command results

use crate::core::error::Result;
use colored::*;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message
pub fn print_info(message: &str) {
    println!("{}", message.white());
}

/// Output captured from a failed subprocess, dimmed
pub fn print_captured(output: &str) {
    for line in output.lines() {
        eprintln!("  {}", line.bright_black());
    }
}

/// Ask where repositories should live; non-interactive sessions take the default.
pub fn prompt_base_directory(default: &Path) -> Result<PathBuf> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        log::debug!("stdin is not a terminal, using {}", default.display());
        return Ok(default.to_path_buf());
    }

    print!(
        "{} {} ",
        "Set base directory:".blue(),
        format!("({})", default.display()).bright_black()
    );
    io::stdout().flush()?;

    let mut input = String::new();
    stdin.lock().read_line(&mut input)?;

    match input.trim() {
        "" => Ok(default.to_path_buf()),
        chosen => Ok(PathBuf::from(chosen)),
    }
}
