//! Services module
//!
//! Capa derivada encima de [`crate::client::ApiClient`]: convierte las
//! respuestas crudas en resultados de dominio (login, registro, páginas).

pub mod auth_service;
pub mod fleet_service;

pub use auth_service::*;
pub use fleet_service::*;
