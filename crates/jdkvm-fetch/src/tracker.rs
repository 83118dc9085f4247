use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(PB_CHARS))
});

static SPINNER_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Byte progress for a single download.
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl ProgressTracker {
    /// A bar when the length is known, a spinner otherwise.
    pub fn new(len: Option<u64>, prefix: &str) -> Self {
        let (pb, style) = match len {
            Some(len) => (ProgressBar::new(len), PB_TEMPLATE.as_ref()),
            None => (ProgressBar::new_spinner(), SPINNER_TEMPLATE.as_ref()),
        };
        let pb = match style {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        pb.set_prefix(prefix.to_string());
        Self { pb }
    }

    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn step(&self, len: u64) -> &Self {
        self.pb.inc(len);
        self
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
