//! Cannon damage overlay panel
//!
//! Turns tracker state into labeled rows. Drawing is left to whoever embeds
//! the panel; `render_panel` lays the rows out as plain text for the REPL.

use crate::tracker::Tracker;

/// A row displaying a label and right-aligned value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLine {
    pub label: String,
    pub value: String,
}

impl OverlayLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Label on the left, value right-aligned to `width` columns.
    /// Rows narrower than label + value get a single space between them.
    pub fn to_text(&self, width: usize) -> String {
        let used = self.label.chars().count() + self.value.chars().count();
        let gap = width.saturating_sub(used).max(1);
        format!("{}{}{}", self.label, " ".repeat(gap), self.value)
    }
}

/// Rows for the current tracker state, in display order
pub fn panel_lines(tracker: &Tracker) -> Vec<OverlayLine> {
    vec![
        OverlayLine::new("Cannon Damage:", tracker.total_damage().to_string()),
        OverlayLine::new("Cannonballs Used:", tracker.cannonballs_used().to_string()),
        OverlayLine::new(
            "Avg Damage:",
            format!("{:.3}", tracker.average_damage_per_cannonball()),
        ),
    ]
}

/// Rows to display at `now_ms`, or None while the overlay is hidden
pub fn render(tracker: &Tracker, now_ms: i64) -> Option<Vec<OverlayLine>> {
    if !tracker.should_show_overlay(now_ms) {
        return None;
    }
    Some(panel_lines(tracker))
}

pub fn render_panel(lines: &[OverlayLine], width: usize) -> String {
    lines
        .iter()
        .map(|line| line.to_text(width))
        .collect::<Vec<_>>()
        .join("\n")
}
