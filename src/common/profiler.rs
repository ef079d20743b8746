use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Wall clock timer started at construction
pub struct Profiler {
    pub start: Instant,
}

impl Profiler {
    pub fn new() -> Self {
        Profiler {
            start: Instant::now(),
        }
    }
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Profiler::new()
    }
}

/// Progress of the lookups of one thread
pub struct LookupProgressBar {
    pub progress_bar: ProgressBar,
}

impl LookupProgressBar {
    pub fn new(size: usize) -> Self {
        let progress_bar = ProgressBar::new(size as u64);
        if let Ok(sty) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {percent:>3}% {msg}")
        {
            progress_bar.set_style(sty);
        }
        progress_bar.set_message("calculating cross sections");

        LookupProgressBar { progress_bar }
    }
    pub fn hidden() -> Self {
        LookupProgressBar {
            progress_bar: ProgressBar::hidden(),
        }
    }
    pub fn update(&self, lookups: u64) {
        self.progress_bar.inc(lookups);
    }
    pub fn finish(&self) {
        self.progress_bar.finish_with_message("done");
    }
}
