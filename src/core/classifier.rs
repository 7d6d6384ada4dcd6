//! Threshold classification of windowed motion magnitudes.
//!
//! The mean magnitude over the sample window is mapped to an activity by
//! ordered, non-overlapping thresholds. Each activity carries a fixed
//! category; the two are always assigned together from the same rule.

use crate::core::window::SampleWindow;
use serde::{Deserialize, Serialize};

/// Minimum number of samples required before a classification is produced.
pub const MIN_SAMPLES: usize = 3;

/// Mean magnitude below this is sleep.
const SLEEP_THRESHOLD: f64 = 0.1;
/// Mean magnitude below this (and at least the sleep bound) is sedentary.
const SEDENTARY_THRESHOLD: f64 = 0.3;
/// Mean magnitude below this (and at least the sedentary bound) is walking.
const WALKING_THRESHOLD: f64 = 0.7;

/// Category tag paired with every activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Work,
    Movement,
}

impl Category {
    /// Lowercase display form, as shown under the activity text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Work => "work",
            Self::Movement => "movement",
        }
    }
}

/// Activity inferred from the motion window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    Sleep,
    Sedentary,
    Walking,
    Exercise,
}

impl Activity {
    /// Uppercase display label, as rendered on the main interface.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sleep => "SLEEP",
            Self::Sedentary => "SEDENTARY",
            Self::Walking => "WALKING",
            Self::Exercise => "EXERCISE",
        }
    }

    /// The category paired with this activity.
    ///
    /// Single lookup so label and category can never diverge.
    pub fn category(&self) -> Category {
        match self {
            Self::Sleep => Category::Health,
            Self::Sedentary => Category::Work,
            Self::Walking => Category::Movement,
            Self::Exercise => Category::Health,
        }
    }

    /// Map a mean magnitude to an activity.
    ///
    /// Thresholds are exclusive upper bounds evaluated low to high; exactly
    /// one activity is produced for any non-negative mean.
    pub fn from_mean(mean: f64) -> Self {
        if mean < SLEEP_THRESHOLD {
            Self::Sleep
        } else if mean < SEDENTARY_THRESHOLD {
            Self::Sedentary
        } else if mean < WALKING_THRESHOLD {
            Self::Walking
        } else {
            Self::Exercise
        }
    }
}

/// Classification errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// The window holds fewer samples than [`MIN_SAMPLES`]; no label is
    /// produced and the caller retains its prior state.
    InsufficientData { have: usize, need: usize },
}

impl std::fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyError::InsufficientData { have, need } => {
                write!(f, "insufficient data: {have} of {need} samples")
            }
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Classify the current window contents.
///
/// Pure function over the window; the caller is responsible for appending
/// the new sample before calling.
pub fn classify(window: &SampleWindow) -> Result<Activity, ClassifyError> {
    if window.len() < MIN_SAMPLES {
        return Err(ClassifyError::InsufficientData {
            have: window.len(),
            need: MIN_SAMPLES,
        });
    }
    Ok(Activity::from_mean(window.mean()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(values: &[f64]) -> SampleWindow {
        let mut window = SampleWindow::new();
        for &v in values {
            window.push(v);
        }
        window
    }

    #[test]
    fn test_insufficient_data_below_three_samples() {
        for n in 0..MIN_SAMPLES {
            let window = window_of(&vec![0.5; n]);
            assert_eq!(
                classify(&window),
                Err(ClassifyError::InsufficientData {
                    have: n,
                    need: MIN_SAMPLES
                })
            );
        }
    }

    #[test]
    fn test_sleep_scenario() {
        let window = window_of(&[0.05, 0.05, 0.05]);
        let activity = classify(&window).unwrap();
        assert_eq!(activity, Activity::Sleep);
        assert_eq!(activity.category(), Category::Health);
    }

    #[test]
    fn test_walking_scenario() {
        let window = window_of(&[0.5, 0.5, 0.5]);
        let activity = classify(&window).unwrap();
        assert_eq!(activity, Activity::Walking);
        assert_eq!(activity.category(), Category::Movement);
    }

    #[test]
    fn test_threshold_buckets() {
        assert_eq!(Activity::from_mean(0.0), Activity::Sleep);
        assert_eq!(Activity::from_mean(0.09), Activity::Sleep);
        assert_eq!(Activity::from_mean(0.15), Activity::Sedentary);
        assert_eq!(Activity::from_mean(0.5), Activity::Walking);
        assert_eq!(Activity::from_mean(1.2), Activity::Exercise);
    }

    #[test]
    fn test_boundary_values_resolve_upward() {
        assert_eq!(Activity::from_mean(0.1), Activity::Sedentary);
        assert_eq!(Activity::from_mean(0.3), Activity::Walking);
        assert_eq!(Activity::from_mean(0.7), Activity::Exercise);
    }

    #[test]
    fn test_label_category_pairing() {
        assert_eq!(Activity::Sleep.category(), Category::Health);
        assert_eq!(Activity::Sedentary.category(), Category::Work);
        assert_eq!(Activity::Walking.category(), Category::Movement);
        assert_eq!(Activity::Exercise.category(), Category::Health);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Activity::Walking.label(), "WALKING");
        assert_eq!(Category::Movement.as_str(), "movement");
    }
}
