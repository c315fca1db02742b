use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, ProgressMode};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    // Progress is drawn on stderr; stdout carries the summary.
    let is_tty = std::io::stderr().is_terminal();
    let progress = progress_enabled(flags.progress, flags.quiet, is_tty);

    let term_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = UI_PREFS.set(UiPrefs {
        progress,
        term_width,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        progress: false,
        term_width: None,
    })
}

const fn progress_enabled(mode: ProgressMode, quiet: bool, is_tty: bool) -> bool {
    match mode {
        ProgressMode::On => !quiet,
        ProgressMode::Off => false,
        ProgressMode::Auto => is_tty && !quiet,
    }
}
