//! Configuración de variables de entorno
//!
//! Este módulo resuelve una única vez la configuración del cliente HTTP:
//! URL base, timeout y política de paginación.

use std::env;
use std::time::Duration;

use crate::utils::errors::{ApiError, ApiResult};

/// Host por defecto cuando no hay override en el entorno
pub const DEFAULT_BASE_URL: &str = "http://192.168.1.100:5000/api";

/// Timeout por defecto de cada petición
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuración del cliente de la API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Estimar `TotalPages` cuando falta el header `x-pagination`
    pub estimate_total_pages: bool,
}

impl ApiConfig {
    /// Configuración con la URL indicada y valores por defecto
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            estimate_total_pages: false,
        }
    }

    /// Cargar configuración desde variables de entorno
    ///
    /// `API_BASE_URL` tiene prioridad sobre `EXPO_PUBLIC_API_URL`; si ninguna
    /// está definida se usa [`DEFAULT_BASE_URL`].
    pub fn from_env() -> ApiResult<Self> {
        let base_url = resolve_base_url(
            env::var("API_BASE_URL").ok(),
            env::var("EXPO_PUBLIC_API_URL").ok(),
        );

        let mut config = Self::new(base_url);

        if let Ok(raw) = env::var("API_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("API_TIMEOUT_MS must be a valid number, got '{}'", raw))
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Ok(raw) = env::var("API_ESTIMATE_TOTAL_PAGES") {
            config.estimate_total_pages = parse_flag(&raw).ok_or_else(|| {
                ApiError::Config(format!(
                    "API_ESTIMATE_TOTAL_PAGES must be true/false, got '{}'",
                    raw
                ))
            })?;
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_estimated_total_pages(mut self, enabled: bool) -> Self {
        self.estimate_total_pages = enabled;
        self
    }

    /// URL absoluta para una ruta relativa a la base (`/Vehicles`, ...)
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Un valor vacío cuenta como ausente
fn resolve_base_url(primary: Option<String>, fallback: Option<String>) -> String {
    let present = |value: &String| !value.trim().is_empty();
    primary
        .filter(present)
        .or_else(|| fallback.filter(present))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
