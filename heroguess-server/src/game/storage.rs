//! Local key-value persistence: settings and daily progress.
//!
//! The worker has no direct `localStorage` access. The bridge sends a
//! snapshot of the relevant keys at boot, the game reads and writes a
//! [`MemoryStore`], and every write is journaled so the route layer can
//! replay it on the main thread (see `board::storage_script`).
//!
//! Storage is best-effort everywhere: unreadable or corrupt values fall
//! back to defaults and failed writes are logged, never surfaced.

use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GameError;

pub const SETTINGS_KEY: &str = "dotaguesser_settings";
pub const DAILY_PROGRESS_KEY: &str = "dotaguesser_daily_progress";
pub const OVERRIDES_KEY: &str = "dotadle_heroes";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError>;
    fn remove(&mut self, key: &str) -> Result<(), GameError>;
}

/// A mutation to replay against the browser's storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    journal: Vec<StorageWrite>,
}

impl MemoryStore {
    /// Store pre-filled from a snapshot. Seeding is not journaled.
    pub fn seeded<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            journal: Vec::new(),
        }
    }

    /// Take the writes made since the last drain, oldest first.
    pub fn drain_journal(&mut self) -> Vec<StorageWrite> {
        std::mem::take(&mut self.journal)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GameError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), GameError> {
        self.values.insert(key.to_string(), value.to_string());
        self.journal.push(StorageWrite::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), GameError> {
        if self.values.remove(key).is_some() {
            self.journal.push(StorageWrite::Remove {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Classic,
    #[default]
    Daily,
}

impl Mode {
    pub fn parse(raw: &str) -> Option<Mode> {
        match raw.trim() {
            "classic" => Some(Mode::Classic),
            "daily" => Some(Mode::Daily),
            _ => None,
        }
    }
}

/// Player preferences. Defaults: daily mode, hard mode off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub mode: Mode,
    pub hard_mode: bool,
}

impl Settings {
    /// Parse stored settings. Each field falls back to its default on its own.
    pub fn from_json(raw: &str) -> Settings {
        let mut settings = Settings::default();
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) else {
            debug!("ignoring unreadable settings");
            return settings;
        };
        if let Some(mode) = fields.get("mode").and_then(Value::as_str).and_then(Mode::parse) {
            settings.mode = mode;
        }
        if let Some(hard) = fields.get("hardMode").and_then(Value::as_bool) {
            settings.hard_mode = hard;
        }
        settings
    }

    pub fn load(store: &impl KeyValueStore) -> Settings {
        match store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => Settings::from_json(&raw),
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("settings not read: {e}");
                Settings::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), GameError> {
        let json = serde_json::to_string(self)
            .map_err(|e| GameError::StorageUnavailable(e.to_string()))?;
        store.set(SETTINGS_KEY, &json)
    }
}

/// Terminal outcome of a day's daily game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DailyStatus {
    #[serde(alias = "win")]
    Won,
    #[serde(alias = "lose")]
    Lost,
    #[serde(alias = "surrender")]
    Surrendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Local calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub status: DailyStatus,
}

impl DailyProgress {
    /// Today's record, if one exists. Records for other days count as absent.
    pub fn load_for(store: &impl KeyValueStore, today: NaiveDate) -> Option<DailyProgress> {
        let raw = match store.get(DAILY_PROGRESS_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("daily progress not read: {e}");
                return None;
            }
        };
        match serde_json::from_str::<DailyProgress>(&raw) {
            Ok(progress) if progress.date == today => Some(progress),
            Ok(_) => None,
            Err(e) => {
                debug!("ignoring unreadable daily progress: {e}");
                None
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), GameError> {
        let json = serde_json::to_string(self)
            .map_err(|e| GameError::StorageUnavailable(e.to_string()))?;
        store.set(DAILY_PROGRESS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn settings_default_when_absent_or_corrupt() {
        assert_eq!(Settings::load(&MemoryStore::default()), Settings::default());
        let store = MemoryStore::seeded([(SETTINGS_KEY, "{oops")]);
        assert_eq!(Settings::load(&store), Settings::default());
        assert_eq!(Settings::default().mode, Mode::Daily);
        assert!(!Settings::default().hard_mode);
    }

    #[test]
    fn settings_fields_fall_back_independently() {
        let s = Settings::from_json(r#"{"mode":"arcade","hardMode":true}"#);
        assert_eq!(
            s,
            Settings {
                mode: Mode::Daily,
                hard_mode: true
            }
        );
        let s = Settings::from_json(r#"{"mode":"classic","hardMode":"yes"}"#);
        assert_eq!(
            s,
            Settings {
                mode: Mode::Classic,
                hard_mode: false
            }
        );
    }

    #[test]
    fn settings_save_uses_camel_case() {
        let mut store = MemoryStore::default();
        Settings {
            mode: Mode::Classic,
            hard_mode: true,
        }
        .save(&mut store)
        .unwrap();
        assert_eq!(
            store.get(SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"mode":"classic","hardMode":true}"#)
        );
    }

    #[test]
    fn progress_only_counts_for_its_day() {
        let mut store = MemoryStore::default();
        DailyProgress {
            date: day(3),
            status: DailyStatus::Won,
        }
        .save(&mut store)
        .unwrap();
        assert_eq!(
            store.get(DAILY_PROGRESS_KEY).unwrap().as_deref(),
            Some(r#"{"date":"2025-06-03","status":"won"}"#)
        );
        assert!(DailyProgress::load_for(&store, day(3)).is_some());
        assert!(DailyProgress::load_for(&store, day(4)).is_none());
    }

    #[test]
    fn progress_accepts_legacy_status_words() {
        let store = MemoryStore::seeded([(
            DAILY_PROGRESS_KEY,
            r#"{"date":"2025-06-03","status":"surrender"}"#,
        )]);
        let progress = DailyProgress::load_for(&store, day(3)).unwrap();
        assert_eq!(progress.status, DailyStatus::Surrendered);
    }

    #[test]
    fn journal_records_writes_in_order() {
        let mut store = MemoryStore::seeded([(OVERRIDES_KEY, "[]")]);
        store.set("a", "1").unwrap();
        store.remove(OVERRIDES_KEY).unwrap();
        store.remove("missing").unwrap();
        assert_eq!(
            store.drain_journal(),
            vec![
                StorageWrite::Set {
                    key: "a".into(),
                    value: "1".into()
                },
                StorageWrite::Remove {
                    key: OVERRIDES_KEY.into()
                },
            ]
        );
        assert!(store.drain_journal().is_empty());
    }
}
