//! # Progress Tracking Module
//!
//! Questo modulo gestisce il progresso di una compressione in corso.
//!
//! ## Responsabilità:
//! - Riconosce le righe di stato di ffmpeg (`time=HH:MM:SS`) su stderr
//! - Converte il tempo elaborato in una percentuale 0-100 rispetto alla durata
//! - Inoltra gli eventi `ProgressEvent` a un `ProgressSink`
//! - Legge stderr come sequenza di righe delimitate da `\n` o `\r`
//!
//! ## Sink disponibili:
//! - `ProgressBarSink`: Barra di progresso con `indicatif`
//! - `UnboundedSender<ProgressEvent>`: Canale tokio verso un altro task
//! - `NoProgress`: Scarta gli eventi
//! - `JsonProgressSink` (in `json_output`): Messaggi JSON su stdout
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:42] [========================>---------------] 61% Compressing... 61%
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedSender;

/// One progress update during an encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Completion in percent, `0..=100`
    pub percent: u8,
    pub description: String,
}

impl ProgressEvent {
    pub fn new(percent: u8) -> Self {
        Self {
            percent,
            description: format!("Compressing... {}%", percent),
        }
    }

    /// Completion as a fraction in `0.0..=1.0`
    pub fn fraction(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}

/// Receives progress events while an encode runs
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

impl ProgressSink for UnboundedSender<ProgressEvent> {
    fn report(&self, event: ProgressEvent) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.send(event);
    }
}

/// Terminal progress bar over `0..=100`
#[derive(Clone)]
pub struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressBarSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Remove the bar from the terminal
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressBarSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ProgressBarSink {
    fn report(&self, event: ProgressEvent) {
        self.bar.set_position(u64::from(event.percent));
        self.bar.set_message(event.description);
    }
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"time=([0-9]+):([0-9]+):([0-9]+)").expect("valid time pattern"))
}

/// Elapsed encode time in whole seconds from an ffmpeg status line.
///
/// Fractional seconds are ignored. Lines without `time=HH:MM:SS` yield `None`.
pub fn parse_progress_time(line: &str) -> Option<u64> {
    let caps = time_pattern().captures(line)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: u64 = caps[3].parse().ok()?;
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// `min(100, floor(elapsed / duration * 100))`, or `None` when duration is not positive
pub fn progress_percent(elapsed_secs: u64, duration_secs: f64) -> Option<u8> {
    if duration_secs.is_nan() || duration_secs <= 0.0 {
        return None;
    }
    let percent = (elapsed_secs as f64 / duration_secs * 100.0).floor();
    Some(percent.min(100.0) as u8)
}

/// Progress event for one stderr line, if the line carries a timestamp
pub fn progress_from_line(line: &str, duration_secs: f64) -> Option<ProgressEvent> {
    let elapsed = parse_progress_time(line)?;
    progress_percent(elapsed, duration_secs).map(ProgressEvent::new)
}

/// Lines of a child's diagnostic stream, split on `\n` or `\r`.
///
/// ffmpeg rewrites its status line in place with a trailing `\r`, so a
/// newline-only reader would see every update at once when the encode ends.
pub struct StderrLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> StderrLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, `None` once the stream is closed
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()));
            }

            match available.iter().position(|b| *b == b'\n' || *b == b'\r') {
                Some(end) => {
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()));
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}
