use indicatif::{ProgressBar, ProgressStyle};
use ocel_fetch::{FetchProgress, format_megabytes};

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bytes_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => {
            "{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {msg}"
        }
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {bytes}/{total_bytes} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    /// Byte-count bar for a transfer of `total` bytes.
    #[must_use]
    pub fn bytes(total: u64, message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(bytes_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn set_position(&self, position: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}

/// Draws a download: a byte bar when the size is announced, a spinner otherwise.
pub struct DownloadProgress {
    label: String,
    current: Option<Progress>,
}

impl DownloadProgress {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            current: None,
        }
    }

    pub fn fail(&self) {
        if let Some(progress) = &self.current {
            progress.finish_err("download failed");
        }
    }
}

impl FetchProgress for DownloadProgress {
    fn started(&mut self, total: Option<u64>) {
        self.current = Some(match total {
            Some(total) => Progress::bytes(total, &self.label),
            None => Progress::spinner(&self.label),
        });
    }

    fn advanced(&mut self, downloaded: u64, _total: Option<u64>) {
        if let Some(progress) = &self.current {
            progress.set_position(downloaded);
        }
    }

    fn finished(&mut self, bytes_written: u64) {
        if let Some(progress) = &self.current {
            progress.finish_ok(&format!("downloaded {}", format_megabytes(bytes_written)));
        }
    }
}
