//! Clients - HTTP client for the fleet REST API
//!
//! `transport` es la capa HTTP cruda; `api_client` expone las operaciones
//! por recurso encima de ella.

pub mod api_client;
pub mod transport;

pub use api_client::{ApiClient, Endpoint, TransportResult};
pub use transport::{is_resolved_status, ApiResponse, HttpClient};
