//! Servicio de autenticación
//!
//! No hay endpoint de login garantizado en el backend: el login descarga la
//! colección completa de `/User` y busca email y contraseña en el cliente.
//! Esto exige que el servidor devuelva contraseñas en claro en el listado;
//! un sistema real debería sustituirlo por un endpoint dedicado con hashing.

use http::StatusCode;
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::client::{ApiClient, ApiResponse};
use crate::models::{AuthenticatedUser, LoginResponse, RegisterRequest, RegisterResponse, User, UserDraft};
use crate::utils::errors::{
    ApiError, ApiResult, TransportError, CONNECTION_ERROR_MESSAGE, SERVER_ERROR_MESSAGE,
};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login realizado com sucesso!";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Email ou senha incorretos.";
pub const REGISTER_ERROR_MESSAGE: &str = "Erro ao registrar usuário";

/// Tipo de usuario por defecto en el registro
pub const DEFAULT_USER_TYPE: i32 = 0;

/// Servicio de login y registro sobre [`ApiClient`]
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Autenticar contra el listado completo de usuarios
    ///
    /// Nunca devuelve error: los fallos de red o del servidor se reflejan
    /// como `success: false` con un mensaje para mostrar.
    pub async fn login_user(&self, email: &str, password: &str) -> LoginResponse {
        info!("🔐 Login attempt for {}", email);

        let response = match self.client.get_users(None).await {
            Ok(response) => response,
            Err(TransportError::Request { message }) => {
                error!("❌ Login failed, could not build users request: {}", message);
                return LoginResponse::failure(message);
            }
            Err(err) => {
                error!("❌ Login failed, could not fetch users: {}", err);
                return LoginResponse::failure(transport_failure_message(&err));
            }
        };

        let users = match user_list(&response) {
            Some(users) => users,
            None => {
                error!(
                    "❌ Login failed, unexpected users response: {} {}",
                    response.status, response.url
                );
                return LoginResponse::failure(SERVER_ERROR_MESSAGE);
            }
        };

        let result = authenticate_against(&users, email, password);
        if result.success {
            info!("✅ Login successful for {}", email);
        } else {
            warn!("⚠️ Invalid credentials for {}", email);
        }
        result
    }

    /// Registrar un usuario nuevo vía `POST /User`
    pub async fn register_user(&self, request: RegisterRequest) -> ApiResult<RegisterResponse> {
        if let Err(errors) = request.validate() {
            warn!("⚠️ Invalid registration data for {}: {}", request.email, errors);
            return Err(ApiError::Validation(errors));
        }

        let draft = UserDraft {
            email: Some(request.email.clone()),
            password: Some(request.password.clone()),
            user_type: Some(request.user_type.unwrap_or(DEFAULT_USER_TYPE)),
        };

        let response = match self.client.create_user(&draft).await {
            Ok(response) => response,
            Err(err) => {
                error!("❌ Erro no registro: {}", err);
                return Err(registration_transport_error(err));
            }
        };

        if response.is_success() {
            info!("✅ User registered: {}", request.email);
            return Ok(RegisterResponse {
                success: true,
                user: response.json::<User>().ok(),
            });
        }

        let message = response
            .error_message()
            .unwrap_or_else(|| REGISTER_ERROR_MESSAGE.to_string());
        error!("❌ Erro no registro ({}): {}", response.status, message);
        Err(ApiError::Rejected {
            status: response.status,
            message,
        })
    }
}

/// Buscar credenciales en una colección ya descargada
pub fn authenticate_against(users: &[User], email: &str, password: &str) -> LoginResponse {
    match users.iter().find(|user| user.matches_credentials(email, password)) {
        Some(user) => LoginResponse {
            success: true,
            message: Some(LOGIN_SUCCESS_MESSAGE.to_string()),
            user: Some(AuthenticatedUser::from(user)),
            token: Some(Uuid::new_v4().to_string()),
        },
        None => LoginResponse::failure(INVALID_CREDENTIALS_MESSAGE),
    }
}

// Sólo un 200 con un array cuenta como listado válido
fn user_list(response: &ApiResponse) -> Option<Vec<User>> {
    if response.status != StatusCode::OK {
        return None;
    }
    match response.json_value()? {
        Value::Array(items) => {
            let total = items.len();
            let users: Vec<User> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            if users.len() < total {
                warn!("⚠️ Skipped {} malformed user entries", total - users.len());
            }
            Some(users)
        }
        _ => None,
    }
}

fn transport_failure_message(err: &TransportError) -> String {
    match err {
        TransportError::Status { .. } => SERVER_ERROR_MESSAGE.to_string(),
        TransportError::NoResponse { .. } => CONNECTION_ERROR_MESSAGE.to_string(),
        TransportError::Request { message } => message.clone(),
    }
}

fn registration_transport_error(err: TransportError) -> ApiError {
    match err {
        TransportError::Status { status, message } => ApiError::Rejected {
            status,
            message: message.unwrap_or_else(|| REGISTER_ERROR_MESSAGE.to_string()),
        },
        other => ApiError::Transport(other),
    }
}
