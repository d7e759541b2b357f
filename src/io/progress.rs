//! Progress display for generation attempts

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks collapsed cells of the current attempt
///
/// Each attempt gets a fresh bar labeled with its seed; finished bars stay on
/// screen with their outcome so retries remain visible.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active bar
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Start a bar for attempt `attempt` of `attempts` over `cells` cells
    pub fn start_attempt(&mut self, attempt: usize, attempts: usize, seed: u64, cells: usize) {
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(format!("attempt {}/{attempts}", attempt + 1));
        bar.set_message(format!("seed {seed}"));
        self.bar = Some(bar);
    }

    /// Report the number of collapsed cells
    pub fn update(&self, collapsed: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_position(collapsed as u64);
        }
    }

    /// Close the current bar with an outcome message
    pub fn finish_attempt(&mut self, outcome: &str) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(outcome.to_string());
        }
    }

    /// Whether an attempt bar is active
    pub const fn is_active(&self) -> bool {
        self.bar.is_some()
    }
}
