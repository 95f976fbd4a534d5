//! Sistema de manejo de errores
//!
//! Este módulo define los errores del cliente en dos niveles: los fallos de
//! transporte de la capa HTTP cruda y los errores de dominio de las operaciones
//! derivadas.

use http::StatusCode;
use thiserror::Error;

/// Mensaje mostrado cuando no llega respuesta del servidor
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Não foi possível conectar ao servidor. Verifique sua conexão e tente novamente.";

/// Mensaje genérico para respuestas 5xx o payloads inesperados
pub const SERVER_ERROR_MESSAGE: &str = "Erro no servidor. Tente novamente mais tarde.";

/// Fallos de la capa de transporte
///
/// Los tres ejes son mutuamente excluyentes: hubo respuesta con estado de
/// error, se envió la petición pero no llegó respuesta, o la petición no se
/// pudo construir.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("No response from server: {message}")]
    NoResponse { message: String },

    #[error("Request error: {message}")]
    Request { message: String },
}

impl TransportError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TransportError::Request {
                message: err.to_string(),
            }
        } else {
            TransportError::NoResponse {
                message: err.to_string(),
            }
        }
    }
}

/// Clasificación de un fallo tal como lo ve la interfaz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ServerRejected,
    Transport,
    RequestConstruction,
    MalformedPayload,
    Configuration,
}

/// Errores principales del cliente
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Malformed payload: {0}")]
    Decode(String),

    #[error("Missing x-pagination header in response from {0}")]
    MissingPaginationHeader(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Config(_) | ApiError::MissingPaginationHeader(_) => {
                FailureKind::Configuration
            }
            ApiError::Transport(TransportError::Status { .. }) | ApiError::Rejected { .. } => {
                FailureKind::ServerRejected
            }
            ApiError::Transport(TransportError::NoResponse { .. }) => FailureKind::Transport,
            ApiError::Transport(TransportError::Request { .. }) | ApiError::Validation(_) => {
                FailureKind::RequestConstruction
            }
            ApiError::Decode(_) => FailureKind::MalformedPayload,
        }
    }

    /// Mensaje listo para mostrar en pantalla
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(TransportError::NoResponse { .. }) => {
                CONNECTION_ERROR_MESSAGE.to_string()
            }
            ApiError::Transport(TransportError::Status { .. })
            | ApiError::Decode(_)
            | ApiError::MissingPaginationHeader(_) => SERVER_ERROR_MESSAGE.to_string(),
            ApiError::Transport(TransportError::Request { message }) => message.clone(),
            ApiError::Validation(errors) => format!("Dados inválidos: {}", errors),
            ApiError::Config(message) => message.clone(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type ApiResult<T> = Result<T, ApiError>;
