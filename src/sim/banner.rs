//! Transient result banner
//!
//! A message with a single pending auto-clear deadline, driven by ticks.
//! Showing a new message replaces the deadline of the previous one.

use serde::{Deserialize, Serialize};

use super::state::BannerColor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBanner {
    text: String,
    color: BannerColor,
    /// Seconds until the text clears; `None` when nothing is scheduled
    clear_in: Option<f32>,
}

impl Default for ResultBanner {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: BannerColor::White,
            clear_in: None,
        }
    }
}

impl ResultBanner {
    /// Show `text`, cancelling any pending clear. Empty text schedules nothing.
    pub fn show(&mut self, text: impl Into<String>, color: BannerColor, hide_after: f32) {
        self.text = text.into();
        self.color = color;
        self.clear_in = if self.text.is_empty() {
            None
        } else {
            Some(hide_after.max(0.0))
        };
    }

    /// Clear immediately and drop any pending deadline
    pub fn clear(&mut self) {
        self.show("", BannerColor::White, 0.0);
    }

    /// Advance the pending clear. Returns true when the text was cleared on this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.clear_in else {
            return false;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.text.clear();
            self.clear_in = None;
            true
        } else {
            self.clear_in = Some(remaining);
            false
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> BannerColor {
        self.color
    }

    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn pending_clear(&self) -> Option<f32> {
        self.clear_in
    }
}
