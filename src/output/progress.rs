use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)";

/// Per-file progress on stderr for a lint or format run.
///
/// Drawn only when stderr is a terminal and the run is not quiet. A hidden bar still
/// tracks its position.
#[derive(Clone)]
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    /// `action` labels the bar, e.g. "Linting".
    #[must_use]
    pub fn new(action: &'static str, total: u64, quiet: bool) -> Self {
        Self::build(action, total, !quiet && std::io::stderr().is_terminal())
    }

    fn build(action: &'static str, total: u64, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }
        let bar = ProgressBar::new(total).with_message(action);
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style.progress_chars("█▓░"));
        }
        Self { bar }
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
