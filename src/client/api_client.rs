//! Operaciones tipadas sobre los recursos REST
//!
//! Cada operación es una única petición HTTP y devuelve la respuesta cruda.
//! Los estados 4xx no son errores a este nivel: el llamador inspecciona
//! `status`.

use std::marker::PhantomData;

use http::Method;

use super::transport::{ApiResponse, HttpClient};
use crate::config::environment::ApiConfig;
use crate::models::{
    MaintenanceHistory, MaintenanceHistoryDraft, PaginationParams, Resource, User, UserDraft,
    Vehicle, VehicleDraft,
};
use crate::utils::errors::{ApiResult, TransportError};

/// Resultado de la capa cruda
pub type TransportResult = Result<ApiResponse, TransportError>;

/// Cliente de la API, construido en el arranque y pasado a quien lo use
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        self.http.config()
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn vehicles(&self) -> Endpoint<'_, Vehicle> {
        Endpoint::new(&self.http)
    }

    pub fn users(&self) -> Endpoint<'_, User> {
        Endpoint::new(&self.http)
    }

    pub fn maintenance_histories(&self) -> Endpoint<'_, MaintenanceHistory> {
        Endpoint::new(&self.http)
    }

    // Vehicles

    pub async fn get_vehicles(&self, params: Option<PaginationParams>) -> TransportResult {
        self.vehicles().list(params).await
    }

    pub async fn create_vehicle(&self, draft: &VehicleDraft) -> TransportResult {
        self.vehicles().create(draft).await
    }

    pub async fn get_vehicle_by_id(&self, id: &str) -> TransportResult {
        self.vehicles().get(id).await
    }

    pub async fn update_vehicle(&self, id: &str, draft: &VehicleDraft) -> TransportResult {
        self.vehicles().update(id, draft).await
    }

    pub async fn delete_vehicle(&self, id: &str) -> TransportResult {
        self.vehicles().delete(id).await
    }

    // Users

    pub async fn get_users(&self, params: Option<PaginationParams>) -> TransportResult {
        self.users().list(params).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> TransportResult {
        self.users().create(draft).await
    }

    pub async fn get_user_by_id(&self, id: &str) -> TransportResult {
        self.users().get(id).await
    }

    pub async fn update_user(&self, id: &str, draft: &UserDraft) -> TransportResult {
        self.users().update(id, draft).await
    }

    pub async fn delete_user(&self, id: &str) -> TransportResult {
        self.users().delete(id).await
    }

    // Maintenance histories

    pub async fn get_maintenance_histories(
        &self,
        params: Option<PaginationParams>,
    ) -> TransportResult {
        self.maintenance_histories().list(params).await
    }

    pub async fn create_maintenance_history(
        &self,
        draft: &MaintenanceHistoryDraft,
    ) -> TransportResult {
        self.maintenance_histories().create(draft).await
    }

    pub async fn get_maintenance_history_by_id(&self, id: &str) -> TransportResult {
        self.maintenance_histories().get(id).await
    }

    pub async fn update_maintenance_history(
        &self,
        id: &str,
        draft: &MaintenanceHistoryDraft,
    ) -> TransportResult {
        self.maintenance_histories().update(id, draft).await
    }

    pub async fn delete_maintenance_history(&self, id: &str) -> TransportResult {
        self.maintenance_histories().delete(id).await
    }
}

/// CRUD genérico sobre la colección de un [`Resource`]
pub struct Endpoint<'a, R: Resource> {
    http: &'a HttpClient,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Endpoint<'a, R> {
    fn new(http: &'a HttpClient) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    /// Ruta del listado con sólo los parámetros presentes
    pub fn list_path(params: Option<&PaginationParams>) -> String {
        let query = params.map(PaginationParams::to_query_string).unwrap_or_default();
        if query.is_empty() {
            R::PATH.to_string()
        } else {
            format!("{}?{}", R::PATH, query)
        }
    }

    pub fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, urlencoding::encode(id))
    }

    pub async fn list(&self, params: Option<PaginationParams>) -> TransportResult {
        let path = Self::list_path(params.as_ref());
        self.http.send(Method::GET, &path).await
    }

    pub async fn create(&self, draft: &R::Draft) -> TransportResult {
        self.http.send_json(Method::POST, R::PATH, draft).await
    }

    pub async fn get(&self, id: &str) -> TransportResult {
        self.http.send(Method::GET, &Self::item_path(id)).await
    }

    pub async fn update(&self, id: &str, draft: &R::Draft) -> TransportResult {
        self.http
            .send_json(Method::PUT, &Self::item_path(id), draft)
            .await
    }

    pub async fn delete(&self, id: &str) -> TransportResult {
        self.http.send(Method::DELETE, &Self::item_path(id)).await
    }
}
