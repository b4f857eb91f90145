//! Output formatting for scan results
//!
//! Files are printed in path order; within a file, matches keep their
//! position order. Files without matches print nothing.

use crate::query::executor::ScoredScanResult;
use crate::query::matcher::ScoredWindow;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

/// When to color output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a termcolor choice for stdout
    pub fn choice_for_stdout(self) -> ColorChoice {
        match self {
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
            ColorMode::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
            ColorMode::Auto => ColorChoice::Never,
        }
    }
}

/// Files with at least one match, sorted by path
fn matching_files(results: &ScoredScanResult) -> Vec<(&PathBuf, &Vec<ScoredWindow>)> {
    let mut files: Vec<_> = results.iter().filter(|(_, m)| !m.is_empty()).collect();
    files.sort_by(|a, b| a.0.cmp(b.0));
    files
}

/// Print one line per match: `[<path>] '<text>'`, optionally followed by the score
pub fn print_matches<W: WriteColor>(out: &mut W, results: &ScoredScanResult, scores: bool) -> io::Result<()> {
    for (path, windows) in matching_files(results) {
        for window in windows {
            write!(out, "[")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            write!(out, "{}", path.display())?;
            out.reset()?;
            write!(out, "] '")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(out, "{}", window.text)?;
            out.reset()?;
            write!(out, "'")?;

            if scores {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, " {:.3}", window.score)?;
                out.reset()?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Print only filenames (for -l flag)
pub fn print_files_only<W: WriteColor>(out: &mut W, results: &ScoredScanResult) -> io::Result<()> {
    for (path, _) in matching_files(results) {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", path.display())?;
        out.reset()?;
        writeln!(out)?;
    }

    Ok(())
}

/// Print match count per file (for -c flag)
pub fn print_match_counts<W: WriteColor>(out: &mut W, results: &ScoredScanResult) -> io::Result<()> {
    for (path, windows) in matching_files(results) {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", path.display())?;
        out.reset()?;
        write!(out, ":")?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", windows.len())?;
        out.reset()?;
        writeln!(out)?;
    }

    Ok(())
}

/// Print all files with matches as one JSON object keyed by path
pub fn print_json<W: Write>(out: &mut W, results: &ScoredScanResult) -> io::Result<()> {
    let document: BTreeMap<String, &Vec<ScoredWindow>> = matching_files(results)
        .into_iter()
        .map(|(path, windows)| (path.display().to_string(), windows))
        .collect();

    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)
}
