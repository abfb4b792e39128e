//! Terminal logging with colored module prefixes.
//!
//! Everything here writes to stderr; stdout is reserved for command output
//! (product JSON, route lists) so it can be piped.
//!
//! # Example
//!
//! ```ignore
//! log!("build"; "{} product pages", count);
//!
//! let progress = Progress::new("prerender", paths.len());
//! for path in &paths {
//!     // ...
//!     progress.inc();
//! }
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stderr},
    sync::{
        OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

// Progress format: "[module] [████░░░░] 42/100"

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;
/// Bar wrapper: " []"
const BAR_WRAPPER_LEN: usize = 3;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix.
///
/// Long single-line messages are truncated to the terminal width.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let message = fit_message(module, message, get_terminal_width() as usize);

    let mut out = stderr().lock();
    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

/// Apply color to a module prefix based on module name.
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "api" => prefix.bright_blue().bold(),
        "store" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Fit `message` on one terminal line after the prefix.
///
/// Multiline messages (error chains, pretty JSON) are printed whole.
fn fit_message<'a>(module: &str, message: &'a str, width: usize) -> &'a str {
    if message.contains('\n') {
        return message;
    }
    let max_msg_len = width.saturating_sub(calc_prefix_len(module.len()));
    truncate_str(message, max_msg_len)
}

/// Truncate a string to fit within `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress
// ============================================================================

/// Single-line progress bar, redrawn in place on stderr.
pub struct Progress {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    current: AtomicUsize,
}

impl Progress {
    pub fn new(module: &str, total: usize) -> Self {
        Self {
            prefix: colorize_prefix(module),
            prefix_len: calc_prefix_len(module.len()),
            total,
            current: AtomicUsize::new(0),
        }
    }

    /// Advance by one and redraw.
    pub fn inc(&self) {
        let current = self.current.fetch_add(1, Ordering::Relaxed) + 1;
        let line = self.render(current, get_terminal_width() as usize);

        let mut out = stderr().lock();
        execute!(out, Clear(ClearType::CurrentLine), cursor::MoveToColumn(0)).ok();
        write!(out, "{line}").ok();
        out.flush().ok();
    }

    /// Clear the bar from the terminal.
    pub fn finish(&self) {
        let mut out = stderr().lock();
        execute!(out, Clear(ClearType::CurrentLine), cursor::MoveToColumn(0)).ok();
        out.flush().ok();
    }

    fn render(&self, current: usize, width: usize) -> String {
        let count = format!("{}/{}", current, self.total);
        let overhead = self.prefix_len + BAR_WRAPPER_LEN + count.len();
        let bar_width = width
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

        let filled = if self.total > 0 {
            (current.min(self.total) * bar_width) / self.total
        } else {
            0
        };
        let bar = "█".repeat(filled) + &"░".repeat(bar_width - filled);

        format!("{} [{}] {}", self.prefix, bar, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_prefix_len() {
        // "build" -> "[build] " = 5 + 2 + 1
        assert_eq!(calc_prefix_len(5), 8);
        assert_eq!(calc_prefix_len(0), 3);
    }

    #[test]
    fn test_fit_message_keeps_multiline_whole() {
        let chain = "Failed to load product 5\n\nCaused by:\n    could not decode response";
        assert_eq!(fit_message("error", chain, 20), chain);
    }

    #[test]
    fn test_fit_message_truncates_single_line() {
        let width = calc_prefix_len("api".len()) + 5;
        assert_eq!(fit_message("api", "hello world", width), "hello");
    }

    #[test]
    fn test_truncate_str_fits() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_str_cuts() {
        assert_eq!(truncate_str("hello world", 5), "hello");
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn test_truncate_str_char_boundary() {
        // "ü" is 2 bytes; cutting inside it backs off
        assert_eq!(truncate_str("aüb", 2), "a");
        assert_eq!(truncate_str("aüb", 3), "aü");
    }

    #[test]
    fn test_progress_render_counts() {
        colored::control::set_override(false);
        let progress = Progress::new("prerender", 4);
        let line = progress.render(2, 80);
        assert!(line.starts_with("[prerender] ["));
        assert!(line.ends_with("] 2/4"));
        assert_eq!(line.matches('█').count(), line.matches('░').count());
    }

    #[test]
    fn test_progress_render_empty_total() {
        colored::control::set_override(false);
        let progress = Progress::new("prerender", 0);
        let line = progress.render(0, 80);
        assert_eq!(line.matches('█').count(), 0);
        assert!(line.ends_with("0/0"));
    }
}
