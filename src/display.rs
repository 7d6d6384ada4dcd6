//! Render-ready display snapshots.
//!
//! The core never draws: each redraw assembles a [`DisplayModel`] carrying
//! literal field values, and the external renderer turns it into pixels.
//! The layout constants below are the contract shared with that renderer
//! and with touch hit-testing.

use crate::core::confirm::ConfirmationSession;
use serde::{Deserialize, Serialize};

/// Width and height of the square watch face, in pixels.
pub const SCREEN_SIZE: i32 = 176;

/// An axis-aligned screen rectangle, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Hit test, edges included.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }
}

/// Bordered panel holding the confirmation question and buttons.
pub const OVERLAY_PANEL: Rect = Rect::new(38, 65, 138, 110);
/// Confirm hit area.
pub const YES_BUTTON: Rect = Rect::new(48, 90, 78, 105);
/// Reject hit area.
pub const NO_BUTTON: Rect = Rect::new(98, 90, 128, 105);

/// Vertical anchor of the activity text (18pt, centered).
pub const ACTIVITY_TEXT_Y: i32 = 75;
/// Vertical anchor of the category text (9pt, centered).
pub const CATEGORY_TEXT_Y: i32 = 95;
/// Vertical anchors of the life percentage value and its label.
pub const LIFE_VALUE_Y: i32 = 135;
pub const LIFE_LABEL_Y: i32 = 148;

/// Overlay portion of a frame while a confirmation is pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayModel {
    /// Question text, e.g. `Started walking?`.
    pub question: String,
    pub panel: Rect,
    pub yes_button: Rect,
    pub no_button: Rect,
}

impl OverlayModel {
    /// Build the overlay view for a pending session.
    pub fn for_session(session: &ConfirmationSession) -> Self {
        Self {
            question: format!("Started {}?", session.candidate.label().to_lowercase()),
            panel: OVERLAY_PANEL,
            yes_button: YES_BUTTON,
            no_button: NO_BUTTON,
        }
    }
}

/// Render-ready snapshot of the whole face.
///
/// Ephemeral: rebuilt on every redraw, never persisted. Building twice from
/// identical inputs yields identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    /// Committed activity text (or the placeholder).
    pub activity_text: String,
    /// Committed category text (or the placeholder).
    pub category_text: String,
    /// Percentage of expected life lived, 0–100.
    pub life_percentage: u8,
    /// Estimated days of battery runway.
    pub battery_days: u32,
    /// Battery charge percentage, for the level bar.
    pub battery_percent: u8,
    /// Present while a confirmation is pending; owns the screen.
    pub overlay: Option<OverlayModel>,
}

impl DisplayModel {
    /// Assemble a snapshot from the current widget state.
    pub fn build(
        activity: &str,
        category: &str,
        life_percentage: u8,
        battery_days: u32,
        battery_percent: u8,
        session: Option<&ConfirmationSession>,
    ) -> Self {
        Self {
            activity_text: activity.to_string(),
            category_text: category.to_string(),
            life_percentage,
            battery_days,
            battery_percent,
            overlay: session.map(OverlayModel::for_session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::Activity;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn session(candidate: Activity) -> ConfirmationSession {
        let opened_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        ConfirmationSession {
            id: Uuid::new_v4(),
            candidate,
            opened_at,
            deadline: opened_at + chrono::Duration::seconds(10),
        }
    }

    #[test]
    fn test_rect_contains_is_edge_inclusive() {
        assert!(YES_BUTTON.contains(48, 90));
        assert!(YES_BUTTON.contains(78, 105));
        assert!(YES_BUTTON.contains(60, 95));
        assert!(!YES_BUTTON.contains(79, 95));
        assert!(!YES_BUTTON.contains(60, 89));
    }

    #[test]
    fn test_button_rects_do_not_overlap() {
        assert!(YES_BUTTON.x1 < NO_BUTTON.x0);
    }

    #[test]
    fn test_overlay_question_is_lowercased() {
        let overlay = OverlayModel::for_session(&session(Activity::Walking));
        assert_eq!(overlay.question, "Started walking?");
    }

    #[test]
    fn test_build_is_idempotent() {
        let s = session(Activity::Exercise);
        let a = DisplayModel::build("SEDENTARY", "work", 45, 23, 87, Some(&s));
        let b = DisplayModel::build("SEDENTARY", "work", 45, 23, 87, Some(&s));
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_without_session_has_no_overlay() {
        let model = DisplayModel::build("WALKING", "movement", 45, 23, 87, None);
        assert!(model.overlay.is_none());
        assert_eq!(model.activity_text, "WALKING");
        assert_eq!(model.category_text, "movement");
    }
}
