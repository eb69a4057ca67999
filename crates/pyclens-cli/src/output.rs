//! Colored output utilities for CLI commands.
//!
//! Uses `termcolor` for cross-platform colored terminal output.
//! Respects `NO_COLOR` environment variable and `--color` flag.

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Resolve `ColorChoice` from CLI flag and environment.
///
/// Priority: `NO_COLOR` env > `--color` flag > auto-detect TTY.
pub fn resolve_color_choice(flag: Option<&str>) -> ColorChoice {
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    match flag {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Styled output writer for terminal.
pub struct StyledOutput {
    stdout: StandardStream,
    stderr: StandardStream,
}

impl StyledOutput {
    /// Create a new styled output with the given color choice.
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(choice),
            stderr: StandardStream::stderr(choice),
        }
    }

    /// Write text with a specific color and style.
    fn write_styled(&mut self, text: &str, color: Option<Color>, bold: bool) {
        let mut spec = ColorSpec::new();
        spec.set_fg(color).set_bold(bold);
        let _ = self.stdout.set_color(&spec);
        let _ = write!(self.stdout, "{}", text);
        let _ = self.stdout.reset();
    }

    /// Bold white text, used for field labels.
    pub fn bold(&mut self, text: &str) {
        self.write_styled(text, None, true);
    }

    /// Cyan text, used for values worth scanning for.
    pub fn info(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Cyan), false);
    }

    /// Yellow bold text.
    pub fn warning(&mut self, text: &str) {
        self.write_styled(text, Some(Color::Yellow), true);
    }

    /// Plain text (no color).
    pub fn plain(&mut self, text: &str) {
        let _ = write!(self.stdout, "{}", text);
    }

    /// Newline.
    pub fn newline(&mut self) {
        let _ = writeln!(self.stdout);
    }

    /// Write error message to stderr.
    pub fn stderr_error(&mut self, text: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        let _ = self.stderr.set_color(&spec);
        let _ = write!(self.stderr, "{}", text);
        let _ = self.stderr.reset();
    }
}
