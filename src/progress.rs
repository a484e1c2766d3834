//! Stderr diagnostics, run statistics and progress display.
//!
//! Everything here writes to stderr: stdout is reserved for candidates
//! (and the combination count), so the tool stays safe to pipe.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

use crate::output::Sink;

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    eprintln!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled progress bar over a known candidate total
pub fn create_candidate_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({per_sec}) {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    pb.set_message("Generating...".to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one generation run.
#[derive(Debug)]
pub struct GenStats {
    pub emitted: u64,
    pub rejected_seq: u64,
    pub rejected_occur: u64,
    start_time: Instant,
}

impl GenStats {
    pub fn new() -> Self {
        Self {
            emitted: 0,
            rejected_seq: 0,
            rejected_occur: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.emitted as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics to stderr
    pub fn print_summary(&self, bytes_written: u64) {
        let elapsed = self.elapsed();
        let rejected = self.rejected_seq + self.rejected_occur;

        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
        eprintln!("{}", "                   GENERATION COMPLETE".green().bold());
        eprintln!("{}", "═".repeat(60).green());
        eprintln!();

        eprintln!(
            "  {} {}",
            "Candidates:     ".green().bold(),
            format_number(self.emitted).green().bold()
        );
        eprintln!(
            "  {} {}",
            "Data written:   ".green(),
            ByteSize(bytes_written)
        );

        if rejected > 0 {
            eprintln!(
                "  {} {}",
                "Pruned (seq):   ".yellow(),
                format_number(self.rejected_seq)
            );
            eprintln!(
                "  {} {}",
                "Pruned (occur): ".yellow(),
                format_number(self.rejected_occur)
            );
        }

        eprintln!();
        eprintln!(
            "  {} {}",
            "Duration:       ".green(),
            format_duration(elapsed)
        );
        eprintln!(
            "  {} {:.2} words/sec",
            "Throughput:     ".green(),
            self.words_per_second()
        );
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
    }
}

impl Default for GenStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

/// How many pushes to batch before moving the progress bar.
const PROGRESS_BATCH: u64 = 1 << 16;

/// Sink decorator feeding a progress bar.
///
/// Bar updates are batched so per-candidate overhead stays negligible at
/// millions of words per second.
pub struct ProgressSink<S> {
    inner: S,
    bar: ProgressBar,
    pending: u64,
}

impl<S: Sink> ProgressSink<S> {
    pub fn new(inner: S, total: u64) -> Self {
        Self {
            inner,
            bar: create_candidate_progress_bar(total),
            pending: 0,
        }
    }

    /// Finish the bar and hand the wrapped sink back.
    pub fn finish(self) -> S {
        self.bar.inc(self.pending);
        self.bar.finish_with_message("Complete".green().to_string());
        self.inner
    }
}

impl<S: Sink> Sink for ProgressSink<S> {
    fn push(&mut self, word: &[u8]) -> anyhow::Result<()> {
        self.inner.push(word)?;
        self.pending += 1;
        if self.pending >= PROGRESS_BATCH {
            self.bar.inc(self.pending);
            self.pending = 0;
        }
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.bar.inc(self.pending);
        self.pending = 0;
        self.inner.flush()
    }
}
