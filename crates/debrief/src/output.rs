//! Colored terminal output utilities.

use console::{Style, Term};

/// Width of the label column in [`Output::field`] rows.
const LABEL_WIDTH: usize = 14;

/// Terminal output formatter.
///
/// Status messages go to stderr; [`Output::data`] writes machine-readable
/// output to stdout so it can be piped.
pub(crate) struct Output {
    term: Term,
    stdout: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            stdout: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a section heading (cyan bold).
    pub(crate) fn heading(&self, title: &str) {
        self.line(&self.cyan_bold.apply_to(title).to_string());
    }

    /// Print an indented `label: value` row with the label dimmed.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = format!("{label}:");
        self.line(&format!(
            "  {} {value}",
            self.dim.apply_to(format!("{label:<LABEL_WIDTH$}"))
        ));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Write data to stdout.
    pub(crate) fn data(&self, content: &str) {
        let _ = self.stdout.write_line(content);
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}
