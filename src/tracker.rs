//! Runtime tracking
//!
//! Measures how long a comet session takes and folds the elapsed seconds into
//! day, ISO-week, month and year buckets persisted as JSON in the comet
//! config directory.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::TrackerError;

const STATS_FILE: &str = "stats.json";

/// Persisted runtime statistics, in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub session: f64,
    pub daily: BTreeMap<String, f64>,
    pub current_day: String,
    pub weekly: BTreeMap<String, f64>,
    pub current_week: String,
    pub monthly: BTreeMap<String, f64>,
    pub current_month: String,
    pub yearly: BTreeMap<String, f64>,
    pub current_year: String,
    pub last_update: String,
}

impl Stats {
    /// Totals for the current periods, for display
    pub fn summary(&self) -> Vec<(&'static str, f64)> {
        let lookup = |map: &BTreeMap<String, f64>, key: &str| map.get(key).copied().unwrap_or(0.0);
        vec![
            ("Session", self.session),
            ("Today", lookup(&self.daily, &self.current_day)),
            ("This week", lookup(&self.weekly, &self.current_week)),
            ("This month", lookup(&self.monthly, &self.current_month)),
            ("This year", lookup(&self.yearly, &self.current_year)),
        ]
    }
}

/// Period keys for a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodKeys {
    pub day: String,
    pub week: String,
    pub month: String,
    pub year: String,
}

impl PeriodKeys {
    pub fn at(time: &DateTime<Local>) -> Self {
        let iso = time.iso_week();
        Self {
            day: time.format("%Y-%m-%d").to_string(),
            week: format!("{}-W{:02}", iso.year(), iso.week()),
            month: time.format("%Y-%m").to_string(),
            year: time.format("%Y").to_string(),
        }
    }
}

/// Tracks one session at a time against a stats file
#[derive(Debug)]
pub struct RuntimeTracker {
    path: PathBuf,
    started_at: Option<DateTime<Local>>,
    stats: Stats,
}

impl RuntimeTracker {
    /// Open the tracker at `<config dir>/stats.json`
    pub fn open_default() -> Result<Self, TrackerError> {
        let dir = crate::config::config_dir().ok_or(TrackerError::NoHomeDir)?;
        Self::new(dir.join(STATS_FILE))
    }

    /// Load stats from `path`, creating the file if it does not exist yet
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, TrackerError> {
        let mut tracker = Self {
            path: path.into(),
            started_at: None,
            stats: Stats::default(),
        };

        if tracker.path.exists() {
            tracker.stats = load_stats(&tracker.path)?;
        } else {
            tracker.save()?;
        }
        Ok(tracker)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self) {
        self.start_at(Local::now());
    }

    pub fn start_at(&mut self, time: DateTime<Local>) {
        self.started_at = Some(time);
    }

    /// Stop tracking and record the elapsed seconds. Returns the session length.
    pub fn stop(&mut self) -> Result<f64, TrackerError> {
        self.stop_at(Local::now())
    }

    pub fn stop_at(&mut self, end: DateTime<Local>) -> Result<f64, TrackerError> {
        let started_at = self.started_at.ok_or(TrackerError::NotStarted)?;
        let elapsed = (end - started_at).num_milliseconds().max(0) as f64 / 1000.0;
        let keys = PeriodKeys::at(&end);

        let stats = &mut self.stats;
        stats.session = elapsed;
        *stats.daily.entry(keys.day.clone()).or_insert(0.0) += elapsed;
        *stats.weekly.entry(keys.week.clone()).or_insert(0.0) += elapsed;
        *stats.monthly.entry(keys.month.clone()).or_insert(0.0) += elapsed;
        *stats.yearly.entry(keys.year.clone()).or_insert(0.0) += elapsed;
        stats.current_day = keys.day;
        stats.current_week = keys.week;
        stats.current_month = keys.month;
        stats.current_year = keys.year;
        stats.last_update = end.to_rfc3339();

        self.save()?;
        self.started_at = None;
        Ok(elapsed)
    }

    /// Drop buckets whose period ended before `days_to_keep` days ago.
    /// Returns how many buckets were removed.
    pub fn cleanup_old_data(&mut self, days_to_keep: u32) -> Result<usize, TrackerError> {
        self.cleanup_old_data_at(days_to_keep, Local::now())
    }

    pub fn cleanup_old_data_at(
        &mut self,
        days_to_keep: u32,
        now: DateTime<Local>,
    ) -> Result<usize, TrackerError> {
        // A window reaching past the calendar range keeps everything
        let Some(cutoff) = now
            .checked_sub_signed(Duration::days(i64::from(days_to_keep)))
            .map(|t| t.date_naive())
        else {
            tracing::debug!(days_to_keep, "retention window exceeds calendar range");
            self.save()?;
            return Ok(0);
        };
        let mut removed = 0;
        for map in [
            &mut self.stats.daily,
            &mut self.stats.weekly,
            &mut self.stats.monthly,
            &mut self.stats.yearly,
        ] {
            let before = map.len();
            map.retain(|key, _| period_end(key).map_or(true, |end| end >= cutoff));
            removed += before - map.len();
        }
        tracing::debug!(removed, %cutoff, "cleaned up stats");

        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> Result<(), TrackerError> {
        let data = serde_json::to_vec_pretty(&self.stats).map_err(TrackerError::Serialize)?;
        atomic_write(&self.path, &data).map_err(|source| TrackerError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "saved stats");
        Ok(())
    }
}

fn load_stats(path: &Path) -> Result<Stats, TrackerError> {
    let data = std::fs::read(path).map_err(|source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| TrackerError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write via a temp file in the same directory so a crash never leaves a
/// half-written stats file behind.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Last calendar day covered by a period key (`YYYY-MM-DD`, `YYYY-Www`,
/// `YYYY-MM` or `YYYY`). `None` for keys in any other shape.
pub fn period_end(key: &str) -> Option<NaiveDate> {
    if let Some((year, week)) = key.split_once("-W") {
        return NaiveDate::from_isoywd_opt(year.parse().ok()?, week.parse().ok()?, Weekday::Sun);
    }
    match key.len() {
        10 => NaiveDate::parse_from_str(key, "%Y-%m-%d").ok(),
        7 => {
            let (year, month) = key.split_once('-')?;
            let (year, month): (i32, u32) = (year.parse().ok()?, month.parse().ok()?);
            let next = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)
            };
            // Validate the month itself before stepping back from the next one
            NaiveDate::from_ymd_opt(year, month, 1)?;
            next?.pred_opt()
        }
        4 => NaiveDate::from_ymd_opt(key.parse().ok()?, 12, 31),
        _ => None,
    }
}
