//! Core logic for the intentionality widget.
//!
//! This module contains:
//! - The fixed-capacity motion window smoothing raw magnitudes
//! - Threshold classification of the window mean into an activity
//! - The confirmation gate holding a proposed change until the wearer
//!   answers (or the session times out)

pub mod classifier;
pub mod confirm;
pub mod window;

// Re-export commonly used types
pub use classifier::{classify, Activity, Category, ClassifyError, MIN_SAMPLES};
pub use confirm::{
    ConfirmationGate, ConfirmationSession, PLACEHOLDER_ACTIVITY, PLACEHOLDER_CATEGORY,
};
pub use window::{SampleWindow, WINDOW_CAPACITY};
