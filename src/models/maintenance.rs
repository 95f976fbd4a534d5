//! Modelo de MaintenanceHistory
//!
//! Referencia un Vehicle por id; el cliente no verifica integridad referencial.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::{validate_history_date, validate_not_empty};

/// Histórico de mantenimiento tal como lo devuelve `/Histories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceHistory {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "super::deserialize_id")]
    pub vehicle_id: String,
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Proyección parcial de MaintenanceHistory para POST/PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceHistoryDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub vehicle_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty", length(max = 500))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_history_date")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,
}

/// Históricos de un vehículo concreto, en el orden recibido
pub fn histories_for_vehicle<'a>(
    histories: &'a [MaintenanceHistory],
    vehicle_id: &str,
) -> Vec<&'a MaintenanceHistory> {
    histories
        .iter()
        .filter(|history| history.vehicle_id == vehicle_id)
        .collect()
}
