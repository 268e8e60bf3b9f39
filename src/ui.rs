//! Terminal output helpers.
//!
//! Pure printing functions honoring the `silent` flag; dry runs use a
//! yellow tick so previewed steps read differently from executed ones.

use console::style;

/// Print a checkpoint line for a completed (or previewed) step.
pub fn checkpoint(silent: bool, dry_run: bool, message: &str) {
    if silent {
        return;
    }
    let tick = if dry_run {
        style("✔").yellow()
    } else {
        style("✔").green()
    };
    println!("{} {}", tick, message);
}

/// Print an informational line.
pub fn info_checkpoint(silent: bool, message: &str) {
    if silent {
        return;
    }
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning to stderr.
pub fn display_warning(silent: bool, message: &str) {
    if silent {
        return;
    }
    eprintln!("{} {}", style("⚠").yellow(), message);
}

/// Print an error to stderr.
pub fn display_error(silent: bool, message: &str) {
    if silent {
        return;
    }
    eprintln!("{} {}", style("✗").red(), message);
}
