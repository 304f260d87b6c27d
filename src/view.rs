//! UI surfaces the controller writes to.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

/// Lifecycle stage shown in the status slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Success,
    Failure,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Idle => "",
            Status::Pending => "⏳ Processing...",
            Status::Success => "✅ Done!",
            Status::Failure => "❌ Failed to summarize.",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three addressable elements a summary page exposes: one text input and
/// two text outputs.
///
/// Methods take `&self` because several submissions may be in flight on the
/// same task and each writes to the slots when it completes.
pub trait SummaryView {
    fn input_value(&self) -> String;
    fn set_status(&self, status: Status);
    fn set_result(&self, text: &str);
}

impl<V: SummaryView + ?Sized> SummaryView for std::sync::Arc<V> {
    fn input_value(&self) -> String {
        (**self).input_value()
    }

    fn set_status(&self, status: Status) {
        (**self).set_status(status)
    }

    fn set_result(&self, text: &str) {
        (**self).set_result(text)
    }
}

#[derive(Debug, Default)]
struct TerminalSlots {
    input: String,
    status: Status,
    result: String,
}

/// Renders the slots on stdout. The input slot is filled by whoever reads
/// the user's line.
#[derive(Debug, Default)]
pub struct TerminalView {
    slots: Mutex<TerminalSlots>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&self, value: &str) {
        self.lock().input = value.to_string();
    }

    pub fn status(&self) -> Status {
        self.lock().status
    }

    pub fn result(&self) -> String {
        self.lock().result.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TerminalSlots> {
        // Slots stay usable even if a writer panicked mid-update.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SummaryView for TerminalView {
    fn input_value(&self) -> String {
        self.lock().input.clone()
    }

    fn set_status(&self, status: Status) {
        self.lock().status = status;
        if status != Status::Idle {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", status);
            let _ = out.flush();
        }
    }

    fn set_result(&self, text: &str) {
        self.lock().result = text.to_string();
        if !text.is_empty() {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "\n{}\n", text);
            let _ = out.flush();
        }
    }
}
