//! Cliente REST de la flota de motos
//!
//! Capa de acceso HTTP para vehículos, usuarios e históricos de mantenimiento,
//! más las operaciones derivadas de login y registro.

pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use client::{ApiClient, ApiResponse, Endpoint, HttpClient};
pub use config::environment::ApiConfig;
pub use models::*;
pub use utils::errors::{ApiError, ApiResult, FailureKind, TransportError};
