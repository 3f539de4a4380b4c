//! Manager configuration.

use crate::cache::CachePolicy;
use crate::error::DataResult;
use crate::manager::{DataManager, PersistentDataManager, VolatileDataManager};
use std::path::PathBuf;

/// Default database file name.
pub const DEFAULT_DB_PATH: &str = "school.db";

/// Where records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// A SQLite database file.
    Sqlite {
        /// Path of the database file.
        path: PathBuf,
    },
    /// A private in-memory SQLite database.
    SqliteInMemory,
    /// A plain in-memory object graph, no SQL involved.
    Volatile,
}

impl Default for Backend {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

/// Configuration for opening a data manager.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Which backend to open.
    pub backend: Backend,

    /// Cache policy for SQLite backends. Ignored by the volatile backend.
    pub cache_policy: CachePolicy,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a SQLite database file at `path`.
    #[must_use]
    pub fn sqlite(mut self, path: impl Into<PathBuf>) -> Self {
        self.backend = Backend::Sqlite { path: path.into() };
        self
    }

    /// Uses a private in-memory SQLite database.
    #[must_use]
    pub fn sqlite_in_memory(mut self) -> Self {
        self.backend = Backend::SqliteInMemory;
        self
    }

    /// Uses the volatile in-memory backend.
    #[must_use]
    pub fn volatile(mut self) -> Self {
        self.backend = Backend::Volatile;
        self
    }

    /// Sets the cache policy.
    #[must_use]
    pub const fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Opens the configured data manager.
    ///
    /// # Errors
    ///
    /// Returns an error if the SQLite database cannot be opened.
    pub fn open(&self) -> DataResult<Box<dyn DataManager>> {
        let manager: Box<dyn DataManager> = match &self.backend {
            Backend::Sqlite { path } => Box::new(
                PersistentDataManager::open(path)?.with_cache_policy(self.cache_policy),
            ),
            Backend::SqliteInMemory => Box::new(
                PersistentDataManager::open_in_memory()?.with_cache_policy(self.cache_policy),
            ),
            Backend::Volatile => Box::new(VolatileDataManager::new()),
        };
        tracing::debug!(backend = manager.backend_name(), "Data manager opened");
        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(
            config.backend,
            Backend::Sqlite {
                path: PathBuf::from("school.db")
            }
        );
        assert_eq!(config.cache_policy, CachePolicy::RefreshOnRead);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .sqlite("/tmp/other.db")
            .cache_policy(CachePolicy::InvalidateOnWrite);
        assert_eq!(
            config.backend,
            Backend::Sqlite {
                path: PathBuf::from("/tmp/other.db")
            }
        );
        assert_eq!(config.cache_policy, CachePolicy::InvalidateOnWrite);
    }

    #[test]
    fn open_each_backend() {
        let volatile = Config::new().volatile().open().unwrap();
        assert_eq!(volatile.backend_name(), "memory");

        let sqlite = Config::new().sqlite_in_memory().open().unwrap();
        assert_eq!(sqlite.backend_name(), "sqlite");
    }
}
