//! Persistence - SQLite-backed key/value store of JSON text
//!
//! Every persisted value is one JSON document under a fixed key (theme
//! preference, completion map, custom workout collection). Reads are
//! best-effort: a missing or corrupt value falls back to the caller's
//! default and is only logged. Writes are last-write-wins; there is exactly
//! one writer.

use std::path::Path;

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::model::WorkoutDay;
use crate::progress::CompletionMap;

pub const DEFAULT_DB_PATH: &str = "abruscheda.db";

const KEY_THEME: &str = "theme";
const KEY_PROGRESS: &str = "workout_progress";
const KEY_CUSTOM: &str = "custom_workouts";

/// Display theme preference, persisted as the literal `dark`/`light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePref {
    Dark,
    Light,
}

impl ThemePref {
    pub fn literal(&self) -> &'static str {
        match self {
            ThemePref::Dark => "dark",
            ThemePref::Light => "light",
        }
    }

    pub fn toggled(&self) -> ThemePref {
        match self {
            ThemePref::Dark => ThemePref::Light,
            ThemePref::Light => ThemePref::Dark,
        }
    }
}

/// Store wrapper
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests and `--db :memory:`.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Read and parse one JSON value; corrupt content degrades to `None`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "discarding corrupt persisted value");
                Ok(None)
            }
        }
    }

    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put(key, &serde_json::to_string(value)?)
    }

    pub fn load_theme(&self) -> Result<Option<ThemePref>> {
        Ok(self.get(KEY_THEME)?.and_then(|raw| match raw.as_str() {
            "dark" => Some(ThemePref::Dark),
            "light" => Some(ThemePref::Light),
            other => {
                warn!(value = other, "ignoring unknown theme preference");
                None
            }
        }))
    }

    pub fn save_theme(&self, theme: ThemePref) -> Result<()> {
        self.put(KEY_THEME, theme.literal())
    }

    /// Completion map, empty when nothing was saved yet (or the saved blob
    /// is unreadable).
    pub fn load_completion(&self) -> Result<CompletionMap> {
        Ok(self.get_json(KEY_PROGRESS)?.unwrap_or_default())
    }

    pub fn save_completion(&self, map: &CompletionMap) -> Result<()> {
        self.put_json(KEY_PROGRESS, map)
    }

    /// Custom workout collection, `None` when absent or unparsable so the
    /// caller falls back to the built-in plan.
    pub fn load_collection(&self) -> Result<Option<Vec<WorkoutDay>>> {
        self.get_json(KEY_CUSTOM)
    }

    pub fn save_collection(&self, days: &[WorkoutDay]) -> Result<()> {
        self.put_json(KEY_CUSTOM, &days)
    }

    /// Drop the custom collection so the defaults apply again.
    pub fn clear_collection(&self) -> Result<()> {
        self.delete(KEY_CUSTOM)
    }
}
