//! Servicio de flota
//!
//! Resuelve los listados paginados en [`Paginated`] y compone vehículo más
//! históricos para las pantallas de detalle.

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::client::{ApiClient, ApiResponse};
use crate::models::{
    estimate_total_pages, histories_for_vehicle, MaintenanceHistory, Paginated,
    PaginationMetadata, PaginationParams, User, Vehicle, PAGINATION_HEADER,
};
use crate::utils::errors::{ApiError, ApiResult};

/// Vehículo con sus históricos de mantenimiento
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleOverview {
    pub vehicle: Vehicle,
    pub histories: Vec<MaintenanceHistory>,
}

impl VehicleOverview {
    pub fn total_cost(&self) -> f64 {
        self.histories.iter().filter_map(|h| h.cost).sum()
    }
}

#[derive(Debug, Clone)]
pub struct FleetService {
    client: ApiClient,
}

impl FleetService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_vehicles_page(&self, params: PaginationParams) -> ApiResult<Paginated<Vehicle>> {
        let response = self.client.get_vehicles(Some(params)).await?;
        self.resolve(&response, params)
    }

    pub async fn list_users_page(&self, params: PaginationParams) -> ApiResult<Paginated<User>> {
        let response = self.client.get_users(Some(params)).await?;
        self.resolve(&response, params)
    }

    pub async fn list_maintenance_histories_page(
        &self,
        params: PaginationParams,
    ) -> ApiResult<Paginated<MaintenanceHistory>> {
        let response = self.client.get_maintenance_histories(Some(params)).await?;
        self.resolve(&response, params)
    }

    /// Vehículo y sus históricos, pedidos en paralelo
    ///
    /// Dos peticiones independientes: no hay consistencia entre ellas.
    pub async fn vehicle_overview(&self, vehicle_id: &str) -> ApiResult<VehicleOverview> {
        let (vehicle, histories) = tokio::join!(
            self.client.get_vehicle_by_id(vehicle_id),
            self.client.get_maintenance_histories(None)
        );

        let vehicle = vehicle?;
        vehicle.ensure_success()?;
        let vehicle: Vehicle = vehicle.json()?;

        let histories = histories?;
        histories.ensure_success()?;
        let histories: Vec<MaintenanceHistory> = histories.json()?;

        let histories = histories_for_vehicle(&histories, vehicle_id)
            .into_iter()
            .cloned()
            .collect();

        Ok(VehicleOverview { vehicle, histories })
    }

    fn resolve<T: DeserializeOwned>(
        &self,
        response: &ApiResponse,
        params: PaginationParams,
    ) -> ApiResult<Paginated<T>> {
        resolve_page(response, params, self.client.config().estimate_total_pages)
    }
}

/// Convertir una respuesta de listado en una página tipada
///
/// Sin header `x-pagination` la página se rechaza salvo que `estimate` esté
/// activo, en cuyo caso el total se deduce del número de elementos.
pub fn resolve_page<T: DeserializeOwned>(
    response: &ApiResponse,
    params: PaginationParams,
    estimate: bool,
) -> ApiResult<Paginated<T>> {
    if let Err(err) = response.ensure_success() {
        warn!("⚠️ Listing rejected: {} {}", response.status, response.url);
        return Err(err);
    }

    let items: Vec<T> = response.json().map_err(|err| {
        error!("❌ Listing body is not a list: {}", response.url);
        err
    })?;

    let total_pages = match response.header(PAGINATION_HEADER) {
        Some(raw) => match PaginationMetadata::parse(raw) {
            Some(meta) => meta.total_pages,
            None => {
                error!("❌ Invalid {} header from {}: {}", PAGINATION_HEADER, response.url, raw);
                return Err(ApiError::Decode(format!(
                    "invalid {} header: {}",
                    PAGINATION_HEADER, raw
                )));
            }
        },
        None if estimate => {
            let estimated = estimate_total_pages(items.len(), params.page_size);
            warn!(
                "⚠️ No {} header from {}, estimating {} page(s)",
                PAGINATION_HEADER, response.url, estimated
            );
            estimated
        }
        None => {
            error!("❌ No {} header from {}", PAGINATION_HEADER, response.url);
            return Err(ApiError::MissingPaginationHeader(response.url.clone()));
        }
    };

    info!(
        "📄 Page {} of {} ({} items) from {}",
        params.page.unwrap_or(1),
        total_pages,
        items.len(),
        response.url
    );

    Ok(Paginated {
        items,
        total_pages,
        page: params.page,
        page_size: params.page_size,
    })
}
