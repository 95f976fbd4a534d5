//! Modelos del sistema
//!
//! Este módulo contiene los DTOs que viajan por HTTP. Ninguno se persiste
//! en el cliente: el servidor es la única fuente de identificadores.

pub mod auth;
pub mod maintenance;
pub mod pagination;
pub mod user;
pub mod vehicle;

pub use auth::*;
pub use maintenance::*;
pub use pagination::*;
pub use user::*;
pub use vehicle::*;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Recurso REST expuesto bajo `/api`
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Proyección parcial usada en POST/PUT
    type Draft: Serialize + Send + Sync;

    /// Ruta de la colección (`/Vehicles`, `/User`, `/Histories`)
    const PATH: &'static str;
}

impl Resource for Vehicle {
    type Draft = VehicleDraft;
    const PATH: &'static str = "/Vehicles";
}

impl Resource for User {
    type Draft = UserDraft;
    const PATH: &'static str = "/User";
}

impl Resource for MaintenanceHistory {
    type Draft = MaintenanceHistoryDraft;
    const PATH: &'static str = "/Histories";
}

// El backend devuelve ids como string o como número según el recurso
fn id_from_value<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("invalid identifier: {}", other))),
    }
}

pub(crate) fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)?
        .ok_or_else(|| D::Error::custom("identifier must not be null"))
}
