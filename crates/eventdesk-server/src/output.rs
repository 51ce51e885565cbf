//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::{Term, measure_text_width, pad_str, Alignment};
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;

/// Manages command output based on flags and terminal capabilities.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags.
    pub fn new(args: &GlobalArgs) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || !io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable payload. Never suppressed, never coloured.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        self.term.write_line(payload)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Left-aligned table with a header row.
    pub fn table(&self, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let widths = column_widths(headers, rows);
        let header = render_row(headers.iter().map(|h| h.to_string()), &widths);
        self.header(&header)?;
        for row in rows {
            self.term
                .write_line(&render_row(row.iter().cloned(), &widths))?;
        }
        Ok(())
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| measure_text_width(cell))
                .chain(std::iter::once(measure_text_width(h)))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn render_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| pad_str(&cell, *width, Alignment::Left, None).into_owned())
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args)
    }

    #[test]
    fn quiet_suppresses_messages() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.warning("careful").is_ok());
        assert!(out.table(&["KEY"], &[vec!["events".into()]]).is_ok());
    }

    #[test]
    fn no_color_flag_is_kept() {
        assert!(make_manager(false, true).no_color);
    }

    #[test]
    fn rows_pad_to_widest_cell() {
        let rows = vec![
            vec!["categories".to_string(), "1".to_string()],
            vec!["users".to_string(), "999".to_string()],
        ];
        let widths = column_widths(&["KEY", "ORDER"], &rows);
        assert_eq!(widths, vec![10, 5]);
        assert_eq!(
            render_row(rows[1].iter().cloned(), &widths),
            "users       999"
        );
    }
}
