//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, TripError},
};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    enforce_conflicts: bool,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            enforce_conflicts: true,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tripline/tripline.db` or
    /// `~/.local/share/tripline/tripline.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Controls whether activity time conflicts are rejected.
    ///
    /// Enforcement is on by default; turning it off makes the conflict
    /// check advisory only (two activities may share a date and time).
    pub fn with_conflict_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_conflicts = enforce;
        self
    }

    /// Builds the configured planner instance, initializing the database.
    ///
    /// # Errors
    ///
    /// Returns [`TripError::FileSystem`] if the database directory cannot
    /// be created, or a database error if schema initialization fails.
    pub async fn build(self) -> Result<Planner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TripError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TripError>(())
        })
        .await
        .map_err(|e| TripError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Planner::new(db_path, self.enforce_conflicts))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tripline")
            .place_data_file("tripline.db")
            .map_err(|e| TripError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
