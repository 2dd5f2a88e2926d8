//! ANSI styling shared by the terminal formatters.

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";

/// Wraps text in ANSI escapes when colors are enabled.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    use_colors: bool,
}

impl Style {
    /// Creates a style helper.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn bold(self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn dim(self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn green(self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn yellow(self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn red(self, text: &str) -> String {
        self.paint(RED, text)
    }

    pub fn blue(self, text: &str) -> String {
        self.paint(BLUE, text)
    }
}
