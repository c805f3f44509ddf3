//! Terminal progress bars for the two phases of a run.
//!
//! Bars draw on stderr and are hidden when stderr is not a terminal or when
//! `BENI_NO_PROGRESS` is set, so piping the YAML output stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const NO_PROGRESS_ENV: &str = "BENI_NO_PROGRESS";

pub fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some() || !std::io::stderr().is_terminal()
}

fn default_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix}: {percent:>3}%|{wide_bar}| {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Progress bar of `len` steps labelled `prefix`, or a hidden bar when
/// `enabled` is false.
pub fn phase_bar(prefix: &'static str, len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(default_style());
    bar.set_prefix(prefix);
    bar
}
