//! Result presenter: the full-screen result dialog and its countdown.
//!
//! ```text
//! [Closed] ──show──→ [Open, countdown=N] ──tick×N──→ [Closed]
//!                          │
//!                          └── close() ──→ [Closed, countdown=0]
//! ```
//!
//! Every `show()` and `close()` bumps a generation number. Ticks carry the
//! generation they were scheduled for, so a tick from a cancelled countdown
//! can never touch a newer result.

use serde::{Deserialize, Serialize};

/// Category of a presented result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Success,
    Error,
    Queued,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Queued => "queued",
        }
    }
}

/// Content of the result dialog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub kind: ResultKind,
    pub title: String,
    pub details: String,
}

/// What a countdown tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick belonged to a cancelled or replaced countdown.
    Stale,
    /// Countdown still running with this many seconds left.
    Running(u32),
    /// Countdown reached zero and the dialog closed.
    Expired,
}

/// Snapshot of the dialog state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultModalState {
    pub is_open: bool,
    pub result: Option<ScanResult>,
    pub countdown: u32,
}

/// Finite-state controller for the result dialog.
#[derive(Clone, Debug)]
pub struct ResultPresenter {
    is_open: bool,
    result: Option<ScanResult>,
    countdown: u32,
    duration_secs: u32,
    generation: u64,
}

impl ResultPresenter {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            is_open: false,
            result: None,
            countdown: 0,
            duration_secs: duration_secs.max(1),
            generation: 0,
        }
    }

    /// Open the dialog with a new result, replacing any running countdown.
    ///
    /// Returns the generation the new countdown must tick with.
    pub fn show(&mut self, result: ScanResult) -> u64 {
        self.generation += 1;
        self.is_open = true;
        self.result = Some(result);
        self.countdown = self.duration_secs;
        self.generation
    }

    /// One second elapsed for the countdown of `generation`.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if !self.is_open || generation != self.generation {
            return TickOutcome::Stale;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.dismiss();
            TickOutcome::Expired
        } else {
            TickOutcome::Running(self.countdown)
        }
    }

    /// Manual dismissal. Returns whether the dialog was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open;
        self.dismiss();
        was_open
    }

    fn dismiss(&mut self) {
        self.generation += 1;
        self.is_open = false;
        self.result = None;
        self.countdown = 0;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.result.as_ref()
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> ResultModalState {
        ResultModalState {
            is_open: self.is_open,
            result: self.result.clone(),
            countdown: self.countdown,
        }
    }
}
