//! Fixed-capacity window of recent motion magnitudes.
//!
//! One magnitude is appended per sampling tick (default every 30 seconds);
//! the classifier smooths instantaneous noise by averaging over the window.

use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Default number of magnitudes kept for classification.
pub const WINDOW_CAPACITY: usize = 10;

/// A FIFO buffer of scalar motion magnitudes.
///
/// The window never grows past its capacity: appending to a full window
/// evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SampleWindow {
    /// Create an empty window with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_CAPACITY)
    }

    /// Create an empty window with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a magnitude, evicting the oldest entry if the window is full.
    pub fn push(&mut self, magnitude: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(magnitude);
    }

    /// Number of magnitudes currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the window has any samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Arithmetic mean of the magnitudes currently in the window.
    ///
    /// Returns 0.0 for an empty window; callers gate on [`len`](Self::len)
    /// before classifying.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().copied().collect::<Vec<f64>>().mean()
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new()
    }
}
