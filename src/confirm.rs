//! Confirmation capability.
//!
//! Destructive operations (delete, reset, import overwrite) ask through
//! this trait instead of touching the terminal directly, so the logic is
//! testable without an interactive session.

use std::io::{self, BufRead, Write};

/// Blocking yes/no prompt
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Closures work as confirmers in tests
impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Interactive confirmer reading from stdin; anything but y/yes declines
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N]: ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirmer used by `--yes`: accepts everything
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}
