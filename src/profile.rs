//! Persisted user profile and life-percentage derivation.
//!
//! The profile is a small JSON record (`intentionality.json`, camelCase
//! fields) holding the last committed activity plus optional demographics.
//! Storage is strictly best-effort: a missing or corrupt record degrades to
//! defaults, and a failed write is logged and dropped — the interaction
//! loop never crashes on storage trouble.

use crate::core::confirm::{PLACEHOLDER_ACTIVITY, PLACEHOLDER_CATEGORY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name of the persisted record.
pub const PROFILE_FILE: &str = "intentionality.json";

/// Life expectancy in years assumed when a country has no table entry.
pub const DEFAULT_LIFE_EXPECTANCY: f64 = 80.0;

/// The persisted profile record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Wearer's birth year, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    /// Wearer's country code, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Last committed activity text.
    pub last_activity: String,
    /// Last committed category text.
    pub last_category: String,
    /// Epoch milliseconds of the last write.
    pub last_update: i64,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            birth_year: None,
            country: None,
            last_activity: PLACEHOLDER_ACTIVITY.to_string(),
            last_category: PLACEHOLDER_CATEGORY.to_string(),
            last_update: 0,
        }
    }
}

/// Country → life expectancy lookup.
///
/// Ships with a small seed table; callers extend it with
/// [`with_entry`](Self::with_entry).
#[derive(Debug, Clone)]
pub struct LifeExpectancyTable {
    entries: HashMap<String, f64>,
}

impl Default for LifeExpectancyTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert("US".to_string(), 78.0);
        Self { entries }
    }
}

impl LifeExpectancyTable {
    /// Add or override a country entry.
    pub fn with_entry(mut self, country: impl Into<String>, years: f64) -> Self {
        self.entries.insert(country.into(), years);
        self
    }

    /// Expectancy for a country, falling back to the default.
    pub fn lookup(&self, country: &str) -> f64 {
        self.entries
            .get(country)
            .copied()
            .unwrap_or(DEFAULT_LIFE_EXPECTANCY)
    }
}

/// Percentage of expected life already lived, clamped to 0–100.
///
/// Requires both demographics; a non-positive expectancy (possible through
/// the extensible table) yields no enrichment.
pub fn life_percentage(
    profile: &UserProfile,
    table: &LifeExpectancyTable,
    current_year: i32,
) -> Option<u8> {
    let birth_year = profile.birth_year?;
    let country = profile.country.as_deref()?;

    let expectancy = table.lookup(country);
    if expectancy <= 0.0 {
        return None;
    }

    let age = f64::from(current_year - birth_year);
    let pct = (age / expectancy * 100.0).round().clamp(0.0, 100.0);
    Some(pct as u8)
}

/// Storage errors. Always logged and swallowed by the store.
#[derive(Debug)]
pub enum ProfileError {
    IoError(String),
    SerializeError(String),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::IoError(e) => write!(f, "IO error: {e}"),
            ProfileError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Sole owner and writer of the in-memory and on-disk profile.
#[derive(Debug)]
pub struct ProfileStore {
    profile: UserProfile,
    persist_path: Option<PathBuf>,
}

impl ProfileStore {
    /// In-memory store with default contents; nothing is ever written.
    pub fn in_memory() -> Self {
        Self {
            profile: UserProfile::default(),
            persist_path: None,
        }
    }

    /// Open a store backed by the given file.
    ///
    /// A missing or unreadable record degrades to defaults; this never
    /// fails.
    pub fn open(path: PathBuf) -> Self {
        let profile = Self::load_from(&path);
        Self {
            profile,
            persist_path: Some(path),
        }
    }

    /// Default record location under the local data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intentionality")
            .join(PROFILE_FILE)
    }

    fn load_from(path: &Path) -> UserProfile {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e,
                        "corrupt profile record, using defaults");
                    UserProfile::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no profile record yet, using defaults");
                UserProfile::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e,
                    "could not read profile record, using defaults");
                UserProfile::default()
            }
        }
    }

    /// The current record.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Record a committed activity change and persist it.
    pub fn commit_activity(&mut self, activity: &str, category: &str, now: DateTime<Utc>) {
        self.profile.last_activity = activity.to_string();
        self.profile.last_category = category.to_string();
        self.touch(now);
    }

    /// Set the wearer demographics and persist.
    pub fn set_demographics(
        &mut self,
        birth_year: Option<i32>,
        country: Option<String>,
        now: DateTime<Utc>,
    ) {
        if birth_year.is_some() {
            self.profile.birth_year = birth_year;
        }
        if country.is_some() {
            self.profile.country = country;
        }
        self.touch(now);
    }

    /// Refresh the record timestamp and persist, keeping the committed
    /// activity unchanged.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.profile.last_update = now.timestamp_millis();
        self.save();
    }

    /// Best-effort write of the current record.
    fn save(&self) {
        let Some(ref path) = self.persist_path else {
            return;
        };
        if let Err(e) = self.write_to(path) {
            tracing::warn!(path = %path.display(), error = %e,
                "could not persist profile record");
        }
    }

    fn write_to(&self, path: &Path) -> Result<(), ProfileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ProfileError::IoError(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(&self.profile)
            .map_err(|e| ProfileError::SerializeError(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| ProfileError::IoError(e.to_string()))?;
        Ok(())
    }
}
