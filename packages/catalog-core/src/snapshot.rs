//! Snapshot persistence for both catalogs.
//!
//! The backing store is opened once at startup and flushed as a single
//! JSON snapshot: temp file first, then an atomic rename, so a crash
//! mid-write never corrupts the previous snapshot.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::films::FilmState;
use crate::catalog::plants::PlantState;
use crate::catalog::{FilmCatalog, PlantCatalog};
use crate::config::CatalogConfig;
use crate::error::CatalogError;

const SNAPSHOT_FILE: &str = "catalog.json";
const SNAPSHOT_TEMP_FILE: &str = "catalog.json.tmp";

/// On-disk representation of the full catalog state.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub plants: PlantState,
    pub films: FilmState,
}

/// Reads and writes catalog snapshots under the configured data directory.
#[derive(Debug)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a snapshot store for the configured data directory.
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
        }
    }

    /// Loads the snapshot from disk. A missing file yields empty catalogs.
    pub fn load(&self) -> Result<(PlantCatalog, FilmCatalog), CatalogError> {
        let path = self.data_dir.join(SNAPSHOT_FILE);
        if !path.exists() {
            return Ok((PlantCatalog::new(), FilmCatalog::new()));
        }

        let mut file = File::open(&path)
            .map_err(|e| CatalogError::Io(format!("Failed to open snapshot: {}", e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| CatalogError::Io(format!("Failed to read snapshot: {}", e)))?;

        let snapshot: Snapshot = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Serialization(e.to_string()))?;

        tracing::debug!("Loaded snapshot from {}", path.display());
        Ok((
            PlantCatalog::from_state(snapshot.plants),
            FilmCatalog::from_state(snapshot.films),
        ))
    }

    /// Writes the current catalog state to disk atomically.
    pub fn save(&self, plants: &PlantCatalog, films: &FilmCatalog) -> Result<(), CatalogError> {
        let snapshot = Snapshot {
            plants: plants.snapshot_state()?,
            films: films.snapshot_state()?,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CatalogError::Serialization(e.to_string()))?;

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| CatalogError::Io(format!("Failed to create data directory: {}", e)))?;

        let temp_path = self.data_dir.join(SNAPSHOT_TEMP_FILE);
        let final_path = self.data_dir.join(SNAPSHOT_FILE);

        let mut file = File::create(&temp_path)
            .map_err(|e| CatalogError::Io(format!("Failed to create temp file: {}", e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| CatalogError::Io(format!("Failed to write snapshot: {}", e)))?;
        file.sync_all()
            .map_err(|e| CatalogError::Io(format!("Failed to sync snapshot: {}", e)))?;

        fs::rename(&temp_path, &final_path)
            .map_err(|e| CatalogError::Io(format!("Failed to rename snapshot: {}", e)))?;

        tracing::debug!("Snapshot written to {}", final_path.display());
        Ok(())
    }
}
