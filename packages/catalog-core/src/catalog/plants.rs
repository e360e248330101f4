//! Botanical catalog: plant types and plants.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::{NewPlant, NewPlantType, Plant, PlantType, Validate};
use crate::store::EntityStore;

/// Stores owned by the plant catalog. Serialized as one unit in snapshots.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlantState {
    pub plant_types: EntityStore<PlantType>,
    pub plants: EntityStore<Plant>,
}

/// The botanical catalog subsystem.
#[derive(Debug, Default)]
pub struct PlantCatalog {
    state: RwLock<PlantState>,
}

impl PlantCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a catalog from snapshot state.
    pub fn from_state(state: PlantState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Clones the current state for snapshotting.
    pub fn snapshot_state(&self) -> Result<PlantState, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(PlantState {
            plant_types: state.plant_types.clone(),
            plants: state.plants.clone(),
        })
    }

    // Plant type operations

    pub fn create_plant_type(&self, new: NewPlantType) -> Result<PlantType, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.plant_types.insert(new.into()))
    }

    pub fn plant_type(&self, id: u64) -> Result<PlantType, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        state.plant_types.get(id).cloned()
    }

    pub fn plant_types(&self) -> Result<Vec<PlantType>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.plant_types.list())
    }

    pub fn update_plant_type(&self, id: u64, new: NewPlantType) -> Result<PlantType, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.plant_types.update(id, new.into())
    }

    /// Deletes a plant type. Plants referencing it keep their foreign key;
    /// integrity is enforced at write time only.
    pub fn delete_plant_type(&self, id: u64) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.plant_types.remove(id).map(|_| ())
    }

    // Plant operations

    pub fn create_plant(&self, new: NewPlant) -> Result<Plant, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        check_plant_refs(&state, &new)?;
        Ok(state.plants.insert(new.into()))
    }

    pub fn plant(&self, id: u64) -> Result<Plant, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        state.plants.get(id).cloned()
    }

    pub fn plants(&self) -> Result<Vec<Plant>, CatalogError> {
        let state = self.state.read().map_err(|_| CatalogError::LockPoisoned)?;
        Ok(state.plants.list())
    }

    pub fn update_plant(&self, id: u64, new: NewPlant) -> Result<Plant, CatalogError> {
        new.validate()?;
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        check_plant_refs(&state, &new)?;
        state.plants.update(id, new.into())
    }

    pub fn delete_plant(&self, id: u64) -> Result<(), CatalogError> {
        let mut state = self.state.write().map_err(|_| CatalogError::LockPoisoned)?;
        state.plants.remove(id).map(|_| ())
    }
}

/// Verifies that the plant's type reference points at an existing row.
fn check_plant_refs(state: &PlantState, new: &NewPlant) -> Result<(), CatalogError> {
    if !state.plant_types.contains(new.plant_type) {
        return Err(CatalogError::DanglingReference {
            entity: "plant",
            field: "plant_type",
            target: "plant type",
            id: new.plant_type,
        });
    }
    Ok(())
}
