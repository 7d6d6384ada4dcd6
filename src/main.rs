//! Intentionality CLI
//!
//! Runs the ambient activity widget in the foreground with stand-in
//! sensor seams, and manages the persisted profile record.

use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use crossbeam_channel::Sender;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use intentionality::{
    config::Config,
    display::DisplayModel,
    profile::{life_percentage, LifeExpectancyTable, ProfileStore},
    scheduler::Scheduler,
    sensor::{NoopBattery, NoopSensor, TouchEvent},
    ABOUT, VERSION,
};

#[derive(Parser)]
#[command(name = "intentionality")]
#[command(version = VERSION)]
#[command(about = "Ambient activity widget for a wearable home screen", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the widget loop in the foreground
    Run {
        /// Battery percentage reported by the stand-in meter
        #[arg(long, default_value_t = 87)]
        battery: u8,
    },

    /// Show the persisted profile and the values derived from it
    Status,

    /// Set wearer demographics used for the life estimate
    Profile {
        /// Birth year, e.g. 1990
        #[arg(long)]
        birth_year: Option<i32>,

        /// Country code for the life-expectancy lookup, e.g. US
        #[arg(long)]
        country: Option<String>,
    },

    /// Show configuration
    Config,

    /// Display what this widget is about
    About,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { battery } => {
            cmd_run(battery);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Profile {
            birth_year,
            country,
        } => {
            cmd_profile(birth_year, country);
        }
        Commands::Config => {
            cmd_config();
        }
        Commands::About => {
            println!("{ABOUT}");
        }
    }
}

fn cmd_run(battery: u8) {
    println!("Intentionality v{VERSION}");
    println!();

    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let store = ProfileStore::open(config.profile_path());

    println!("Starting widget...");
    println!("  Sample interval: {}s", config.sample_interval.as_secs());
    println!("  Redraw interval: {}s", config.redraw_interval.as_secs());
    println!("  Confirm timeout: {}s", config.confirm_timeout.as_secs());
    println!("  Last activity: {}", store.profile().last_activity);
    println!();
    println!("No accelerometer on this host: the noop sensor never samples,");
    println!("so the widget idles on its last confirmed state.");
    println!();
    println!("While a confirmation is showing, type `y`/`n` (or raw `x y`");
    println!("screen coordinates) and press Enter. Ctrl+C stops the widget.");
    println!();

    // Touch input channel: stdin stands in for the touch layer.
    let (touch_tx, touch_rx) = crossbeam_channel::bounded::<TouchEvent>(16);
    spawn_touch_reader(touch_tx);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let mut scheduler = Scheduler::new(
        &config,
        store,
        Box::new(NoopSensor::new()),
        Box::new(NoopBattery::at(battery)),
        Utc::now(),
    );

    // Main loop: touch events are dispatched as they arrive, everything
    // else runs off the tick clock.
    while running.load(Ordering::SeqCst) {
        match touch_rx.recv_timeout(Duration::from_millis(250)) {
            Ok(touch) => {
                if let Some(frame) = scheduler.dispatch_touch(Utc::now(), touch) {
                    render(&frame);
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                // stdin closed; keep ticking without touch input.
                thread::sleep(Duration::from_millis(250));
            }
        }

        if let Some(frame) = scheduler.tick(Utc::now()) {
            render(&frame);
        }
    }

    println!();
    println!("Stopping widget...");
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();
    let store = ProfileStore::open(config.profile_path());
    let profile = store.profile();

    println!("Intentionality Status");
    println!("=====================");
    println!();
    println!("Profile record: {:?}", config.profile_path());
    println!();
    println!("  Last activity: {}", profile.last_activity);
    println!("  Last category: {}", profile.last_category);

    if profile.last_update > 0 {
        if let Some(when) = chrono::DateTime::from_timestamp_millis(profile.last_update) {
            println!("  Last update: {}", when.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    } else {
        println!("  Last update: never");
    }

    println!(
        "  Birth year: {}",
        profile
            .birth_year
            .map_or_else(|| "not set".to_string(), |y| y.to_string())
    );
    println!(
        "  Country: {}",
        profile.country.as_deref().unwrap_or("not set")
    );

    let table = LifeExpectancyTable::default();
    match life_percentage(profile, &table, Utc::now().year()) {
        Some(pct) => println!("  Life: {pct}%"),
        None => println!("  Life: unknown (set --birth-year and --country)"),
    }
}

fn cmd_profile(birth_year: Option<i32>, country: Option<String>) {
    if birth_year.is_none() && country.is_none() {
        eprintln!("Nothing to set. Pass --birth-year and/or --country.");
        std::process::exit(1);
    }

    let config = Config::load().unwrap_or_default();
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    let mut store = ProfileStore::open(config.profile_path());
    store.set_demographics(birth_year, country, Utc::now());

    let profile = store.profile();
    println!("Profile updated:");
    println!(
        "  Birth year: {}",
        profile
            .birth_year
            .map_or_else(|| "not set".to_string(), |y| y.to_string())
    );
    println!(
        "  Country: {}",
        profile.country.as_deref().unwrap_or("not set")
    );
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

/// Print a frame the way the excluded renderer would draw it.
fn render(frame: &DisplayModel) {
    if let Some(ref overlay) = frame.overlay {
        println!("[overlay] {}   [YES] [NO]", overlay.question);
    } else {
        println!(
            "[face] {} / {} | life {}% | battery {}d ({}%)",
            frame.activity_text,
            frame.category_text,
            frame.life_percentage,
            frame.battery_days,
            frame.battery_percent
        );
    }
}

/// Read stdin lines and forward them to the scheduler as touch events.
fn spawn_touch_reader(tx: Sender<TouchEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(touch) = parse_touch(line.trim()) else {
                continue;
            };
            if tx.send(touch).is_err() {
                break;
            }
        }
    });
}

/// `y`/`n` map to the button centres; `x y` is taken as raw coordinates.
fn parse_touch(line: &str) -> Option<TouchEvent> {
    match line {
        "" => None,
        "y" | "yes" => Some(TouchEvent::new(63, 97)),
        "n" | "no" => Some(TouchEvent::new(113, 97)),
        other => {
            let mut parts = other.split_whitespace();
            let x = parts.next()?.parse().ok()?;
            let y = parts.next()?.parse().ok()?;
            Some(TouchEvent::new(x, y))
        }
    }
}
