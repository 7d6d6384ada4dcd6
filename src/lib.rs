//! Intentionality - ambient activity widget for a wearable home screen.
//!
//! Focus on what matters, not what time it is: the widget infers the
//! wearer's current activity from motion data, asks for confirmation
//! before committing a change, and renders a compact status display
//! (activity, category, remaining-life estimate, battery runway).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Intentionality                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌────────────┐              │
//! │  │  Sensor  │──▶│  Window  │──▶│ Classifier │              │
//! │  │  (seam)  │   │ (10 mag) │   │ (threshold)│              │
//! │  └──────────┘   └──────────┘   └─────┬──────┘              │
//! │                                      ▼                      │
//! │  ┌──────────┐   ┌──────────┐   ┌────────────┐              │
//! │  │ Profile  │◀──│Scheduler │◀─▶│  Confirm   │              │
//! │  │  Store   │   │ (ticks)  │   │   Gate     │              │
//! │  └──────────┘   └────┬─────┘   └────────────┘              │
//! │                      ▼                                      │
//! │               ┌────────────┐                                │
//! │               │  Display   │──▶ external renderer           │
//! │               │   Model    │                                │
//! │               └────────────┘                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use intentionality::{
//!     config::Config,
//!     profile::ProfileStore,
//!     scheduler::Scheduler,
//!     sensor::{NoopBattery, NoopSensor},
//! };
//!
//! let config = Config::default();
//! let store = ProfileStore::open(config.profile_path());
//! let mut scheduler = Scheduler::new(
//!     &config,
//!     store,
//!     Box::new(NoopSensor::new()),
//!     Box::new(NoopBattery::new()),
//!     Utc::now(),
//! );
//!
//! // Each tick runs whatever has come due and returns the frame to render.
//! if let Some(frame) = scheduler.tick(Utc::now()) {
//!     println!("{}", frame.activity_text);
//! }
//! ```

pub mod config;
pub mod core;
pub mod display;
pub mod profile;
pub mod scheduler;
pub mod sensor;

// Re-export key types at crate root for convenience
pub use config::Config;
pub use crate::core::{
    classify, Activity, Category, ClassifyError, ConfirmationGate, ConfirmationSession,
    SampleWindow,
};
pub use display::{DisplayModel, OverlayModel, Rect};
pub use profile::{life_percentage, LifeExpectancyTable, ProfileStore, UserProfile};
pub use scheduler::Scheduler;
pub use sensor::{
    BatteryMeter, MotionSample, MotionSensor, NoopBattery, NoopSensor, ReplayBattery,
    ReplaySensor, SensorError, TouchEvent,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short manifesto shown by the CLI.
pub const ABOUT: &str = r#"
╔══════════════════════════════════════════════════════════════════╗
║                        INTENTIONALITY                            ║
╠══════════════════════════════════════════════════════════════════╣
║                                                                  ║
║  Focus on what matters, not what time it is.                     ║
║                                                                  ║
║  The widget watches how you move, guesses what you are doing,    ║
║  and asks before it writes anything down:                        ║
║                                                                  ║
║    • Activity inferred from a 5-minute motion window             ║
║    • Every change confirmed by you (or quietly dropped)          ║
║    • One small record: last activity, category, demographics     ║
║                                                                  ║
║  The display shows the confirmed activity, how much of an        ║
║  expected life has passed, and how many days the battery         ║
║  has left.                                                       ║
║                                                                  ║
╚══════════════════════════════════════════════════════════════════╝
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_contents() {
        assert!(ABOUT.contains("INTENTIONALITY"));
        assert!(ABOUT.contains("what time it is"));
    }
}
