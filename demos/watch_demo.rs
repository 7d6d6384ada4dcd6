//! Demonstration of the intentionality widget pipeline.
//!
//! This example shows how to:
//! 1. Script a motion sensor and battery meter
//! 2. Drive the scheduler with a hand-stepped clock
//! 3. Watch a confirmation session open, and answer it with a touch
//! 4. Inspect the display models the renderer would receive
//!
//! Run with: cargo run --example watch_demo

use chrono::{DateTime, Duration, TimeZone, Utc};

use intentionality::{
    config::Config,
    display::DisplayModel,
    profile::ProfileStore,
    scheduler::Scheduler,
    sensor::{MotionSample, ReplayBattery, ReplaySensor, TouchEvent},
    VERSION,
};

fn print_frame(label: &str, frame: &DisplayModel) {
    match frame.overlay {
        Some(ref overlay) => println!("  [{label}] overlay: {:?}  [YES] [NO]", overlay.question),
        None => println!(
            "  [{label}] {} / {} | life {}% | battery {}d ({}%)",
            frame.activity_text,
            frame.category_text,
            frame.life_percentage,
            frame.battery_days,
            frame.battery_percent
        ),
    }
}

fn main() {
    println!("Intentionality Widget Demo v{VERSION}");
    println!("==================================");
    println!();

    // Three sleep-level readings, then a run of walking-level ones.
    let mut sensor = ReplaySensor::new();
    for _ in 0..3 {
        sensor.push_sample(MotionSample::new(0.03, 0.02, 0.03));
    }
    for _ in 0..10 {
        sensor.push_sample(MotionSample::new(0.3, 0.3, 0.2));
    }

    let battery = ReplayBattery::from_levels(vec![87, 85]);

    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 6, 1, 7, 0, 0).unwrap();
    let mut scheduler = Scheduler::new(
        &Config::default(),
        ProfileStore::in_memory(),
        Box::new(sensor),
        Box::new(battery),
        start,
    );

    println!("Stepping the clock in 30s sampling ticks...");
    println!();

    // Walk the first few minutes of the morning. Proposals open as the
    // window mean creeps up from sleep toward walking; all of them are
    // left to time out unanswered.
    for step in 0..11 {
        let now = start + Duration::seconds(step * 30);
        if let Some(frame) = scheduler.tick(now) {
            print_frame(&format!("t+{:>3}s", step * 30), &frame);
        }
    }

    println!();
    println!("This time the walking proposal gets a YES.");
    println!();

    // Keep ticking until the walking confirmation opens, then confirm it
    // two seconds later with a touch on the YES button.
    let mut now = start + Duration::seconds(11 * 30);
    loop {
        if let Some(frame) = scheduler.tick(now) {
            print_frame("tick", &frame);
            if frame.overlay.is_some() {
                break;
            }
        }
        now += Duration::seconds(30);
    }

    let confirm_at = now + Duration::seconds(2);
    if let Some(frame) = scheduler.dispatch_touch(confirm_at, TouchEvent::new(63, 97)) {
        print_frame("touch", &frame);
    }

    println!();
    println!(
        "Committed record: {} / {}",
        scheduler.store().profile().last_activity,
        scheduler.store().profile().last_category
    );
    println!();

    // The renderer contract is plain data; show one frame verbatim.
    println!("Raw display model handed to the renderer:");
    match serde_json::to_string_pretty(&scheduler.frame()) {
        Ok(json) => {
            for line in json.lines() {
                println!("  {line}");
            }
        }
        Err(e) => eprintln!("Error serializing frame: {e}"),
    }

    println!();
    println!("Demo complete!");
}
