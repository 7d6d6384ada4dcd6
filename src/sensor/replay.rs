//! Scripted sensor implementations for demos and tests.

use crate::sensor::types::{BatteryMeter, MotionSample, MotionSensor, SensorError};
use std::collections::VecDeque;

/// A motion sensor that plays back a scripted sequence of readings.
///
/// Each `read` pops the next entry; once the script is exhausted the sensor
/// reports itself unavailable, which the scheduler treats as a skipped
/// sampling tick.
#[derive(Debug, Default)]
pub struct ReplaySensor {
    script: VecDeque<Result<MotionSample, SensorError>>,
}

impl ReplaySensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a sequence of successful readings.
    pub fn from_samples(samples: impl IntoIterator<Item = MotionSample>) -> Self {
        Self {
            script: samples.into_iter().map(Ok).collect(),
        }
    }

    /// Append a successful reading to the script.
    pub fn push_sample(&mut self, sample: MotionSample) {
        self.script.push_back(Ok(sample));
    }

    /// Append a failed read to the script.
    pub fn push_failure(&mut self) {
        self.script
            .push_back(Err(SensorError::Read("scripted failure".to_string())));
    }

    /// Number of scripted readings left.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MotionSensor for ReplaySensor {
    fn read(&mut self) -> Result<MotionSample, SensorError> {
        self.script.pop_front().unwrap_or(Err(SensorError::Unavailable))
    }
}

/// A battery meter that plays back scripted levels, then holds the last one.
#[derive(Debug, Default)]
pub struct ReplayBattery {
    script: VecDeque<u8>,
    last: Option<u8>,
}

impl ReplayBattery {
    pub fn from_levels(levels: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: levels.into_iter().map(|l| l.min(100)).collect(),
            last: None,
        }
    }
}

impl BatteryMeter for ReplayBattery {
    fn level(&mut self) -> Option<u8> {
        if let Some(level) = self.script.pop_front() {
            self.last = Some(level);
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_sensor_plays_script_in_order() {
        let mut sensor = ReplaySensor::from_samples(vec![
            MotionSample::new(0.1, 0.0, 0.0),
            MotionSample::new(0.2, 0.0, 0.0),
        ]);

        assert_eq!(sensor.read().unwrap().x, 0.1);
        assert_eq!(sensor.read().unwrap().x, 0.2);
        assert!(sensor.read().is_err());
    }

    #[test]
    fn test_replay_sensor_scripted_failure() {
        let mut sensor = ReplaySensor::new();
        sensor.push_sample(MotionSample::new(0.1, 0.0, 0.0));
        sensor.push_failure();
        sensor.push_sample(MotionSample::new(0.3, 0.0, 0.0));

        assert!(sensor.read().is_ok());
        assert!(sensor.read().is_err());
        assert_eq!(sensor.read().unwrap().x, 0.3);
    }

    #[test]
    fn test_replay_battery_holds_last_level() {
        let mut battery = ReplayBattery::from_levels(vec![90, 80]);
        assert_eq!(battery.level(), Some(90));
        assert_eq!(battery.level(), Some(80));
        assert_eq!(battery.level(), Some(80));
    }

    #[test]
    fn test_replay_battery_empty_script_has_no_reading() {
        let mut battery = ReplayBattery::default();
        assert_eq!(battery.level(), None);
    }
}
