use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::User;
use crate::utils::validation::validate_not_empty;

/// Usuario autenticado, sin contraseña
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: i32,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            user_type: user.user_type,
        }
    }
}

/// Response de login, sintetizada en el cliente
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthenticatedUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            user: None,
            token: None,
        }
    }
}

/// Request de registro
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_not_empty")]
    pub password: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<i32>,
}

/// Response de registro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user: Option<User>,
}
