//! Progress indicators

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// One backend call shown as an indicatif spinner.
///
/// Create with [`Step::new`], then end it with [`Step::finish`] or
/// [`Step::fail`]. Spinners are hidden in JSON mode so stdout stays
/// machine-readable; the finish lines go to stderr either way.
pub struct Step {
    pb: ProgressBar,
    label: String,
    quiet: bool,
}

impl Step {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_visibility(label, true)
    }

    /// A step that draws and prints nothing.
    pub fn hidden(label: impl Into<String>) -> Self {
        Self::with_visibility(label, false)
    }

    fn with_visibility(label: impl Into<String>, visible: bool) -> Self {
        let label = label.into();
        let pb = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("{}...", label));
        if visible {
            pb.enable_steady_tick(std::time::Duration::from_millis(80));
        }
        Self {
            pb,
            label,
            quiet: !visible,
        }
    }

    /// Prints `"  label... done: {summary}"`.
    pub fn finish(&self, summary: &str) {
        self.pb.finish_and_clear();
        if !self.quiet {
            eprintln!("  {}... {}: {}", self.label, "done".green(), summary);
        }
    }

    /// Prints `"  label... failed"`; the caller reports the reason.
    pub fn fail(&self) {
        self.pb.finish_and_clear();
        if !self.quiet {
            eprintln!("  {}... {}", self.label, "failed".red());
        }
    }

    pub fn warn(&self, msg: impl std::fmt::Display) {
        if self.quiet {
            return;
        }
        self.pb.println(format!("  {}: {}", "warn".yellow(), msg));
    }
}
