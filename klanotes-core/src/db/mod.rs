//! SQLite-backed note store.

mod notes;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use rusqlite::Connection;

/// Handle to the notes database.
///
/// Cloning is cheap; all clones share one connection. Each statement runs on
/// its own, so the engine's single-statement atomicity is the only guarantee.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        tracing::debug!("Opened database at {}", path.display());

        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database. Used by tests.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    /// Open the database in the platform data directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// `<data dir>/klanotes.db`, e.g. `~/.local/share/klanotes/klanotes.db`.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "klanotes")
            .ok_or_else(|| anyhow!("Could not determine a data directory"))?;
        Ok(dirs.data_dir().join("klanotes.db"))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create tables and indexes if they do not exist yet.
    pub fn migrate(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute_batch(schema::SCHEMA)?;
            Ok(())
        })
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("Database connection lock poisoned"))?;
        f(&conn)
    }
}
