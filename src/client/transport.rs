//! Capa HTTP cruda
//!
//! Envuelve `reqwest` con la URL base, los headers por defecto y el timeout
//! del [`ApiConfig`]. Toda respuesta con estado < 500 se devuelve tal cual,
//! 4xx incluidos; sólo los 5xx y los fallos de red se convierten en
//! [`TransportError`].

use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::config::environment::ApiConfig;
use crate::utils::errors::{ApiError, ApiResult, TransportError};

/// Política de estados: todo lo que no sea 5xx es una respuesta resuelta
pub fn is_resolved_status(status: StatusCode) -> bool {
    status.as_u16() < 500
}

/// Respuesta HTTP resuelta (estado, headers y body)
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: String,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            url: url.into(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializar el body al tipo indicado
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            ApiError::Decode(format!("Failed to parse response from {}: {}", self.url, e))
        })
    }

    /// Body como JSON genérico; `None` si está vacío o no es JSON
    pub fn json_value(&self) -> Option<Value> {
        if self.body.is_empty() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Mensaje de error enviado por el servidor (`error`, o en su defecto `message`)
    pub fn error_message(&self) -> Option<String> {
        let body = self.json_value()?;
        ["error", "message"].iter().find_map(|field| {
            body.get(*field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
    }

    /// Convertir un estado no 2xx en [`ApiError::Rejected`]
    pub fn ensure_success(&self) -> ApiResult<()> {
        if self.is_success() {
            return Ok(());
        }
        Err(ApiError::Rejected {
            status: self.status,
            message: self
                .error_message()
                .unwrap_or_else(|| self.status.to_string()),
        })
    }
}

/// Cliente HTTP configurado una vez al arrancar
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ApiConfig,
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Petición sin body
    pub async fn send(&self, method: Method, path: &str) -> Result<ApiResponse, TransportError> {
        self.execute(method, path, None).await
    }

    /// Petición con body JSON
    pub async fn send_json<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body).map_err(|e| {
            let err = TransportError::Request {
                message: format!("Failed to serialize request body: {}", e),
            };
            error!("❌ API Error: {} {} - {}", method, path, err);
            err
        })?;
        self.execute(method, path, Some(payload)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<Vec<u8>>,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.config.url_for(path);
        info!("➡️ API Request: {} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = TransportError::from(e);
                match &err {
                    TransportError::Request { message } => {
                        error!("❌ API Error: {} {} - {}", method, url, message)
                    }
                    _ => error!("❌ API Error Request: {} {} - {}", method, url, err),
                }
                return Err(err);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            let err = TransportError::NoResponse {
                message: format!("Failed to read response body: {}", e),
            };
            error!("❌ API Error Request: {} {} - {}", method, url, err);
            err
        })?;

        let response = ApiResponse::new(status, headers, url, body.to_vec());

        if !is_resolved_status(status) {
            error!(
                "❌ API Error Response: {} {} - {}",
                status,
                response.url,
                response.text()
            );
            return Err(TransportError::Status {
                status,
                message: response.error_message(),
            });
        }

        info!("📡 API Response: {} {}", status, response.url);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse::new(status, HeaderMap::new(), "http://test/api/User", body.as_bytes().to_vec())
    }

    #[test]
    fn test_status_policy() {
        assert!(is_resolved_status(StatusCode::OK));
        assert!(is_resolved_status(StatusCode::NOT_FOUND));
        assert!(is_resolved_status(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!is_resolved_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_resolved_status(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_error_message_prefers_error_field() {
        let response = response_with(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Email já cadastrado","message":"ignored"}"#,
        );
        assert_eq!(response.error_message().as_deref(), Some("Email já cadastrado"));

        let response = response_with(StatusCode::BAD_REQUEST, r#"{"message":"Dados inválidos"}"#);
        assert_eq!(response.error_message().as_deref(), Some("Dados inválidos"));

        assert_eq!(response_with(StatusCode::BAD_REQUEST, "").error_message(), None);
        assert_eq!(response_with(StatusCode::BAD_REQUEST, "<html>").error_message(), None);
        assert_eq!(
            response_with(StatusCode::BAD_REQUEST, r#"{"error":"  "}"#).error_message(),
            None
        );
    }

    #[test]
    fn test_ensure_success() {
        assert!(response_with(StatusCode::CREATED, "{}").ensure_success().is_ok());

        match response_with(StatusCode::NOT_FOUND, "").ensure_success() {
            Err(ApiError::Rejected { status, message }) => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "404 Not Found");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_json_decode_error() {
        let response = response_with(StatusCode::OK, r#"{"not":"a list"}"#);
        let parsed: ApiResult<Vec<Value>> = response.json();
        assert!(matches!(parsed, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-pagination", HeaderValue::from_static(r#"{"TotalPages":4}"#));
        let response = ApiResponse::new(StatusCode::OK, headers, "http://test", Vec::new());
        assert_eq!(response.header("X-Pagination"), Some(r#"{"TotalPages":4}"#));
    }
}
