//! Tick-driven coordination of sampling, confirmation, battery estimation
//! and redraw.
//!
//! The scheduler is an explicit owned state struct: it holds the motion
//! window, the confirmation gate, the profile store and the cadence
//! deadlines, and exposes a `tick(now)` plus a touch dispatch. Time is
//! always passed in, so every timing behavior is testable without
//! wall-clock waits. All mutation happens on the caller's single logical
//! thread; an in-flight confirmation is never overwritten by a routine
//! redraw (the redraw is skipped instead).

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::config::Config;
use crate::core::{classify, ConfirmationGate, SampleWindow};
use crate::display::{DisplayModel, NO_BUTTON, YES_BUTTON};
use crate::profile::{life_percentage, LifeExpectancyTable, ProfileStore};
use crate::sensor::{BatteryMeter, MotionSensor, TouchEvent};

/// Life percentage shown until demographics are known.
const DEFAULT_LIFE_PERCENTAGE: u8 = 58;
/// Battery runway shown until the first battery reading.
const DEFAULT_BATTERY_DAYS: u32 = 23;
/// Battery percentage shown until the first battery reading.
const DEFAULT_BATTERY_PERCENT: u8 = 87;

/// Days of runway for a charge level, scaled linearly from the
/// full-charge estimate.
pub fn estimate_runway_days(level: u8, full_days: u32) -> u32 {
    (f64::from(level) / 100.0 * f64::from(full_days)).round() as u32
}

/// Owns the widget state and drives it from timer ticks and touch events.
pub struct Scheduler {
    window: SampleWindow,
    gate: ConfirmationGate,
    store: ProfileStore,
    sensor: Box<dyn MotionSensor>,
    battery: Box<dyn BatteryMeter>,

    sample_every: Duration,
    battery_every: Duration,
    redraw_every: Duration,

    next_sample_at: DateTime<Utc>,
    next_battery_at: DateTime<Utc>,
    next_redraw_at: DateTime<Utc>,

    life_percentage: u8,
    battery_days: u32,
    battery_percent: u8,
    full_battery_days: u32,
}

impl Scheduler {
    /// Build a scheduler seeded from the persisted profile.
    ///
    /// The first tick at or after `start` emits the initial main frame;
    /// sampling and battery reads begin one interval later.
    pub fn new(
        config: &Config,
        store: ProfileStore,
        sensor: Box<dyn MotionSensor>,
        battery: Box<dyn BatteryMeter>,
        start: DateTime<Utc>,
    ) -> Self {
        Self::with_table(config, store, sensor, battery, start, LifeExpectancyTable::default())
    }

    /// Same as [`new`](Self::new) with a caller-extended expectancy table.
    pub fn with_table(
        config: &Config,
        store: ProfileStore,
        sensor: Box<dyn MotionSensor>,
        battery: Box<dyn BatteryMeter>,
        start: DateTime<Utc>,
        table: LifeExpectancyTable,
    ) -> Self {
        let profile = store.profile();
        let gate = ConfirmationGate::new(
            profile.last_activity.clone(),
            profile.last_category.clone(),
            Duration::seconds(config.confirm_timeout.as_secs() as i64),
        );
        let life = life_percentage(profile, &table, start.year())
            .unwrap_or(DEFAULT_LIFE_PERCENTAGE);

        let sample_every = Duration::seconds(config.sample_interval.as_secs() as i64);
        let battery_every = Duration::seconds(config.battery_interval.as_secs() as i64);
        let redraw_every = Duration::seconds(config.redraw_interval.as_secs() as i64);

        Self {
            window: SampleWindow::new(),
            gate,
            store,
            sensor,
            battery,
            sample_every,
            battery_every,
            redraw_every,
            next_sample_at: start + sample_every,
            next_battery_at: start + battery_every,
            next_redraw_at: start,
            life_percentage: life,
            battery_days: DEFAULT_BATTERY_DAYS,
            battery_percent: DEFAULT_BATTERY_PERCENT,
            full_battery_days: config.full_battery_days,
        }
    }

    /// Whether a confirmation overlay currently owns the screen.
    pub fn is_pending(&self) -> bool {
        self.gate.is_pending()
    }

    /// Current battery runway estimate, in days.
    pub fn battery_days(&self) -> u32 {
        self.battery_days
    }

    /// Read access to the profile store.
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Run every action that has come due by `now`.
    ///
    /// Within one tick: an expired confirmation closes first, then sample
    /// ingestion and its state transition, then the battery refresh, then
    /// the redraw decision. Returns the frame to hand to the renderer, or
    /// `None` when nothing is due (or the overlay suppresses a routine
    /// redraw).
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<DisplayModel> {
        let mut redraw = false;
        let mut opened = false;

        // Timed-out session closes before anything else so the redraw below
        // repaints the main interface with the pre-change activity.
        if self.gate.expire(now) {
            self.store.touch(now);
            redraw = true;
        }

        if now >= self.next_sample_at {
            self.next_sample_at = now + self.sample_every;
            opened = self.ingest_sample(now);
        }

        if now >= self.next_battery_at {
            self.next_battery_at = now + self.battery_every;
            self.refresh_battery();
            redraw = true;
        }

        if now >= self.next_redraw_at {
            self.next_redraw_at = now + self.redraw_every;
            redraw = true;
        }

        if opened {
            // Out-of-band paint: the overlay owns the screen from here on.
            return Some(self.frame());
        }
        if redraw && !self.gate.is_pending() {
            return Some(self.frame());
        }
        None
    }

    /// Route a touch into the confirmation gate.
    ///
    /// Touches are only interpreted while a confirmation is pending; a hit
    /// on YES commits and persists, a hit on NO reverts the display, and
    /// anything else is a no-op. Returns the out-of-band frame on a state
    /// change.
    pub fn dispatch_touch(&mut self, now: DateTime<Utc>, touch: TouchEvent) -> Option<DisplayModel> {
        if !self.gate.is_pending() {
            return None;
        }

        if YES_BUTTON.contains(touch.x, touch.y) {
            let (activity, category) = self.gate.confirm()?;
            self.store.commit_activity(&activity, &category, now);
            return Some(self.frame());
        }

        if NO_BUTTON.contains(touch.x, touch.y) {
            if self.gate.reject() {
                // The record keeps the previously committed activity; only
                // the display reverts to the placeholder.
                self.store.touch(now);
                return Some(self.frame());
            }
            return None;
        }

        tracing::debug!(x = touch.x, y = touch.y, "touch outside hit areas ignored");
        None
    }

    /// Snapshot of the current face.
    pub fn frame(&self) -> DisplayModel {
        DisplayModel::build(
            self.gate.activity(),
            self.gate.category(),
            self.life_percentage,
            self.battery_days,
            self.battery_percent,
            self.gate.session(),
        )
    }

    /// Ingest one motion sample and feed the classification to the gate.
    ///
    /// Returns `true` when a confirmation session opened.
    fn ingest_sample(&mut self, now: DateTime<Utc>) -> bool {
        let sample = match self.sensor.read() {
            Ok(sample) => sample,
            Err(e) => {
                // Tolerated: skip this tick, window unchanged.
                tracing::debug!(error = %e, "sampling tick skipped");
                return false;
            }
        };
        self.window.push(sample.magnitude());

        match classify(&self.window) {
            Ok(activity) => self.gate.propose(activity, now),
            Err(e) => {
                // Window still warming up; prior activity is retained.
                tracing::debug!(error = %e, "classification skipped");
                false
            }
        }
    }

    fn refresh_battery(&mut self) {
        if let Some(level) = self.battery.level() {
            self.battery_percent = level;
            self.battery_days = estimate_runway_days(level, self.full_battery_days);
            tracing::debug!(level, days = self.battery_days, "battery runway updated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{MotionSample, NoopBattery, ReplayBattery, ReplaySensor};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn at(secs: i64) -> DateTime<Utc> {
        t0() + Duration::seconds(secs)
    }

    fn scheduler_with(sensor: ReplaySensor) -> Scheduler {
        Scheduler::new(
            &Config::default(),
            ProfileStore::in_memory(),
            Box::new(sensor),
            Box::new(NoopBattery::new()),
            t0(),
        )
    }

    fn steady(magnitude: f64, count: usize) -> ReplaySensor {
        ReplaySensor::from_samples(vec![MotionSample::new(magnitude, 0.0, 0.0); count])
    }

    #[test]
    fn test_estimate_runway_days() {
        assert_eq!(estimate_runway_days(100, 27), 27);
        assert_eq!(estimate_runway_days(87, 27), 23);
        assert_eq!(estimate_runway_days(50, 27), 14);
        assert_eq!(estimate_runway_days(0, 27), 0);
    }

    #[test]
    fn test_initial_frame_is_seeded_from_profile() {
        let mut scheduler = scheduler_with(ReplaySensor::new());

        let frame = scheduler.tick(t0()).expect("initial frame");
        assert_eq!(frame.activity_text, "CURRENT ACTIVITY");
        assert_eq!(frame.category_text, "Category");
        assert_eq!(frame.life_percentage, DEFAULT_LIFE_PERCENTAGE);
        assert_eq!(frame.battery_days, DEFAULT_BATTERY_DAYS);
        assert!(frame.overlay.is_none());
    }

    #[test]
    fn test_nothing_due_between_ticks() {
        let mut scheduler = scheduler_with(ReplaySensor::new());
        scheduler.tick(t0());

        assert!(scheduler.tick(at(10)).is_none());
        assert!(scheduler.tick(at(29)).is_none());
    }

    #[test]
    fn test_insufficient_data_never_opens_a_session() {
        let mut scheduler = scheduler_with(steady(0.5, 2));
        scheduler.tick(t0());

        // Two samples ingested at 30s and 60s; below the three-sample
        // minimum, so no proposal can fire.
        assert!(scheduler.tick(at(30)).is_none());
        let frame = scheduler.tick(at(60)).expect("redraw due");
        assert!(frame.overlay.is_none());
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_third_sample_opens_confirmation() {
        let mut scheduler = scheduler_with(steady(0.5, 3));
        scheduler.tick(t0());
        scheduler.tick(at(30));
        scheduler.tick(at(60));

        let frame = scheduler.tick(at(90)).expect("overlay frame");
        let overlay = frame.overlay.expect("overlay present");
        assert_eq!(overlay.question, "Started walking?");
        assert!(scheduler.is_pending());
        // The committed display is unchanged until confirmation.
        assert_eq!(frame.activity_text, "CURRENT ACTIVITY");
    }

    #[test]
    fn test_sensor_failure_skips_tick_and_keeps_window() {
        let mut sensor = ReplaySensor::new();
        sensor.push_sample(MotionSample::new(0.5, 0.0, 0.0));
        sensor.push_sample(MotionSample::new(0.5, 0.0, 0.0));
        sensor.push_failure();
        sensor.push_sample(MotionSample::new(0.5, 0.0, 0.0));

        let mut scheduler = scheduler_with(sensor);
        scheduler.tick(t0());
        scheduler.tick(at(30));
        scheduler.tick(at(60));
        // Failed read at 90s: still only two samples in the window.
        scheduler.tick(at(90));
        assert!(!scheduler.is_pending());

        // Third good sample at 120s completes the window.
        scheduler.tick(at(120));
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_redraw_suppressed_while_pending() {
        let config = Config {
            redraw_interval: std::time::Duration::from_secs(5),
            ..Config::default()
        };
        let mut scheduler = Scheduler::new(
            &config,
            ProfileStore::in_memory(),
            Box::new(steady(0.5, 3)),
            Box::new(NoopBattery::new()),
            t0(),
        );
        scheduler.tick(t0());
        scheduler.tick(at(30));
        scheduler.tick(at(60));
        assert!(scheduler.tick(at(90)).is_some()); // overlay opens

        // Redraws at 95s fall inside the pending window and are skipped.
        assert!(scheduler.tick(at(95)).is_none());
        assert!(scheduler.is_pending());
    }

    #[test]
    fn test_timeout_repaints_main_interface() {
        let mut scheduler = scheduler_with(steady(0.5, 3));
        scheduler.tick(t0());
        scheduler.tick(at(30));
        scheduler.tick(at(60));
        scheduler.tick(at(90)); // overlay opens, deadline 100s

        let frame = scheduler.tick(at(100)).expect("timeout repaint");
        assert!(frame.overlay.is_none());
        assert_eq!(frame.activity_text, "CURRENT ACTIVITY");
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_battery_tick_updates_runway_and_redraws() {
        let mut scheduler = Scheduler::new(
            &Config::default(),
            ProfileStore::in_memory(),
            Box::new(ReplaySensor::new()),
            Box::new(ReplayBattery::from_levels(vec![50])),
            t0(),
        );
        scheduler.tick(t0());

        let frame = scheduler.tick(at(300)).expect("battery redraw");
        assert_eq!(frame.battery_percent, 50);
        assert_eq!(frame.battery_days, 14);
        assert_eq!(scheduler.battery_days(), 14);
    }

    #[test]
    fn test_battery_without_reading_keeps_previous_estimate() {
        let mut scheduler = Scheduler::new(
            &Config::default(),
            ProfileStore::in_memory(),
            Box::new(ReplaySensor::new()),
            Box::new(ReplayBattery::default()),
            t0(),
        );
        scheduler.tick(t0());

        let frame = scheduler.tick(at(300)).expect("battery redraw");
        assert_eq!(frame.battery_days, DEFAULT_BATTERY_DAYS);
        assert_eq!(frame.battery_percent, DEFAULT_BATTERY_PERCENT);
    }

    #[test]
    fn test_touch_while_committed_is_noop() {
        let mut scheduler = scheduler_with(ReplaySensor::new());
        scheduler.tick(t0());

        assert!(scheduler
            .dispatch_touch(at(5), TouchEvent::new(60, 95))
            .is_none());
    }

    #[test]
    fn test_touch_outside_buttons_is_noop() {
        let mut scheduler = scheduler_with(steady(0.5, 3));
        scheduler.tick(t0());
        scheduler.tick(at(30));
        scheduler.tick(at(60));
        scheduler.tick(at(90));

        assert!(scheduler
            .dispatch_touch(at(92), TouchEvent::new(10, 10))
            .is_none());
        assert!(scheduler.is_pending());
    }
}
