//! Botanical catalog entities: plant types and plants.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::Validate;
use crate::store::Entity;

/// A category of plants, referenced by `Plant::plant_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantType {
    pub id: u64,
    pub name: String,
}

impl Entity for PlantType {
    const KIND: &'static str = "plant type";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Inbound payload for creating or replacing a plant type.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlantType {
    pub name: String,
}

impl From<NewPlantType> for PlantType {
    fn from(new: NewPlantType) -> Self {
        PlantType {
            id: 0,
            name: new.name,
        }
    }
}

impl Validate for NewPlantType {
    fn validate(&self) -> Result<(), CatalogError> {
        Ok(())
    }
}

/// A plant record. `plant_type` is a foreign key into the plant-type store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: u64,
    pub scientific_name: String,
    pub common_name: String,
    pub plant_type: u64,
    pub watering_needs: String,
    pub ideal_temperature: f64,
    pub description: Option<String>,
}

impl Entity for Plant {
    const KIND: &'static str = "plant";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Inbound payload for creating or replacing a plant.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlant {
    pub scientific_name: String,
    pub common_name: String,
    pub plant_type: u64,
    pub watering_needs: String,
    pub ideal_temperature: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<NewPlant> for Plant {
    fn from(new: NewPlant) -> Self {
        Plant {
            id: 0,
            scientific_name: new.scientific_name,
            common_name: new.common_name,
            plant_type: new.plant_type,
            watering_needs: new.watering_needs,
            ideal_temperature: new.ideal_temperature,
            description: new.description,
        }
    }
}

impl Validate for NewPlant {
    fn validate(&self) -> Result<(), CatalogError> {
        if self.ideal_temperature <= 0.0 {
            return Err(CatalogError::Validation("invalid temperature"));
        }
        Ok(())
    }
}
