use std::io::Write;

use console::Style;

/// How a status line should stand out on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something changed (bold green).
    Action,
    /// Nothing changed, reported for completeness (bold cyan).
    Info,
    /// A change the operator should double-check (bold yellow).
    Warn,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Tone::Action => Style::new().green().bold(),
            Tone::Info => Style::new().cyan().bold(),
            Tone::Warn => Style::new().yellow().bold(),
        }
    }
}

/// Print a Cargo-style status line on stderr: `     Matched require a@v1.0.0`
///
/// The `label` is right-aligned to 12 characters and styled by `tone`.
/// Colours are dropped automatically when stderr is not a terminal.
pub fn status(tone: Tone, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        tone.style().apply_to(label),
    );
}
