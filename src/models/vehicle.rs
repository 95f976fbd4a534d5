//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su draft para create/update.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{normalize_license_plate, validate_license_plate, validate_not_empty};

/// Vehicle tal como lo devuelve `/Vehicles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(
        default,
        deserialize_with = "super::deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle_id: Option<String>,
    pub license_plate: String,
    pub vehicle_model: String,
}

/// Proyección parcial de Vehicle para POST/PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub vehicle_model: Option<String>,
}

impl VehicleDraft {
    /// Draft completo con la placa ya normalizada
    pub fn new(license_plate: &str, vehicle_model: &str) -> Self {
        Self {
            license_plate: Some(normalize_license_plate(license_plate)),
            vehicle_model: Some(vehicle_model.trim().to_string()),
        }
    }
}

impl From<&Vehicle> for VehicleDraft {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            license_plate: Some(vehicle.license_plate.clone()),
            vehicle_model: Some(vehicle.vehicle_model.clone()),
        }
    }
}
