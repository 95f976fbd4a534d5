//! Modelo de User
//!
//! El email es la clave natural (sin distinguir mayúsculas). El listado del
//! backend incluye la contraseña en texto plano, y el login por escaneo
//! depende de ello.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User tal como lo devuelve `/User`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(
        rename = "userID",
        default,
        deserialize_with = "super::deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: i32,
}

impl User {
    /// Coincidencia exacta de credenciales (email sin distinguir mayúsculas)
    ///
    /// Una entrada sin contraseña nunca coincide.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
            && self.password.as_deref() == Some(password)
    }
}

/// Proyección parcial de User para POST/PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub password: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<i32>,
}
