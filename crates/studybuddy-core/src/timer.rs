//! Focus (pomodoro) countdown.

use serde::Serialize;

/// Default focus block: 25 minutes.
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

/// Countdown driven by the host's clock ticks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusTimer {
    remaining: u32,
    preset: u32,
    running: bool,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl FocusTimer {
    pub fn new(preset_secs: u32) -> Self {
        let preset = if preset_secs == 0 { DEFAULT_FOCUS_SECS } else { preset_secs };
        Self {
            remaining: preset,
            preset,
            running: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn preset(&self) -> u32 {
        self.preset
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or pause. A finished timer stays paused.
    pub fn toggle(&mut self) {
        self.running = !self.running && self.remaining > 0;
    }

    /// Advance by `secs`. Returns true when this tick finished the countdown.
    pub fn tick(&mut self, secs: u32) -> bool {
        if !self.running || secs == 0 {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(secs);
        if self.remaining == 0 {
            self.running = false;
            log::info!("Focus block finished");
            return true;
        }
        false
    }

    /// Stop and rewind to the preset.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.preset;
    }

    /// Edit the preset; the countdown jumps to it. A zero preset falls back to
    /// the default on the next reset.
    pub fn set_preset(&mut self, minutes: u32, seconds: u32) {
        let total = minutes.saturating_mul(60).saturating_add(seconds);
        self.remaining = total;
        self.preset = if total == 0 { DEFAULT_FOCUS_SECS } else { total };
        self.running = false;
    }

    /// `MM:SS`; minutes grow past two digits for long presets.
    pub fn format(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
