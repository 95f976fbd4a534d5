#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use moto_fleet_client::{ApiClient, ApiConfig};

/// Petición recibida por el backend simulado
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub content_type: Option<String>,
}

/// Backend en memoria que imita `/api/Vehicles`, `/api/User` y `/api/Histories`
#[derive(Clone)]
pub struct MockBackend {
    pub vehicles: Arc<Mutex<Vec<Value>>>,
    pub histories: Arc<Mutex<Vec<Value>>>,
    pub users_body: Arc<Mutex<Value>>,
    pub users_status: Arc<Mutex<StatusCode>>,
    pub pagination_header: Arc<Mutex<bool>>,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    next_id: Arc<AtomicU64>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            vehicles: Arc::new(Mutex::new(Vec::new())),
            histories: Arc::new(Mutex::new(Vec::new())),
            users_body: Arc::new(Mutex::new(json!([]))),
            users_status: Arc::new(Mutex::new(StatusCode::OK)),
            pagination_header: Arc::new(Mutex::new(true)),
            requests: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl MockBackend {
    pub fn with_users(users: Value) -> Self {
        let backend = Self::default();
        *backend.users_body.lock().unwrap() = users;
        backend
    }

    pub fn set_users_response(&self, status: StatusCode, body: Value) {
        *self.users_status.lock().unwrap() = status;
        *self.users_body.lock().unwrap() = body;
    }

    pub fn set_pagination_header(&self, enabled: bool) {
        *self.pagination_header.lock().unwrap() = enabled;
    }

    pub fn seed_vehicles(&self, count: usize) {
        let mut vehicles = self.vehicles.lock().unwrap();
        for i in 0..count {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            vehicles.push(json!({
                "vehicleId": format!("v-{}", id),
                "licensePlate": format!("AW{}", 35678 + i),
                "vehicleModel": "POP"
            }));
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_uri(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|r| r.uri.clone())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/Vehicles", get(list_vehicles).post(create_vehicle))
            .route(
                "/api/Vehicles/:id",
                get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
            )
            .route("/api/User", get(list_users).post(create_user))
            .route("/api/Histories", get(list_histories).post(create_history))
            .route("/api/Histories/:id", get(get_history))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    /// Levantar el backend en un puerto libre y devolver la URL base
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.router();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }
}

/// Cliente apuntando al backend simulado
pub async fn client_for(backend: &MockBackend) -> ApiClient {
    let base_url = backend.spawn().await;
    ApiClient::new(ApiConfig::new(base_url)).unwrap()
}

/// URL base de un puerto donde no escucha nadie
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

async fn record(State(backend): State<MockBackend>, request: Request, next: Next) -> Response {
    let content_type = request
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    backend.requests.lock().unwrap().push(RecordedRequest {
        method: request.method().to_string(),
        uri: request.uri().to_string(),
        content_type,
    });
    next.run(request).await
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{} not found", what) })),
    )
        .into_response()
}

fn paginate(backend: &MockBackend, items: Vec<Value>, query: &HashMap<String, String>) -> Response {
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let size: Option<usize> = query.get("pageSize").and_then(|s| s.parse().ok());

    let total = items.len();
    let (slice, total_pages) = match size {
        Some(size) if size > 0 => {
            let slice: Vec<Value> = items.into_iter().skip((page - 1) * size).take(size).collect();
            (slice, total.div_ceil(size).max(1))
        }
        _ => (items, 1),
    };

    let mut headers = HeaderMap::new();
    if *backend.pagination_header.lock().unwrap() {
        let meta = json!({ "TotalCount": total, "TotalPages": total_pages, "CurrentPage": page });
        headers.insert(
            "x-pagination",
            HeaderValue::from_str(&meta.to_string()).unwrap(),
        );
    }
    (StatusCode::OK, headers, Json(Value::Array(slice))).into_response()
}

async fn list_vehicles(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let vehicles = backend.vehicles.lock().unwrap().clone();
    paginate(&backend, vehicles, &query)
}

async fn create_vehicle(State(backend): State<MockBackend>, Json(mut body): Json<Value>) -> Response {
    body["vehicleId"] = json!(backend.next_id("v"));
    backend.vehicles.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn get_vehicle(State(backend): State<MockBackend>, Path(id): Path<String>) -> Response {
    let vehicles = backend.vehicles.lock().unwrap();
    match vehicles.iter().find(|v| v["vehicleId"] == id.as_str()) {
        Some(vehicle) => Json(vehicle.clone()).into_response(),
        None => not_found("Vehicle"),
    }
}

async fn update_vehicle(
    State(backend): State<MockBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut vehicles = backend.vehicles.lock().unwrap();
    match vehicles.iter_mut().find(|v| v["vehicleId"] == id.as_str()) {
        Some(vehicle) => {
            if let Some(fields) = body.as_object() {
                for (key, value) in fields {
                    vehicle[key] = value.clone();
                }
            }
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Vehicle"),
    }
}

async fn delete_vehicle(State(backend): State<MockBackend>, Path(id): Path<String>) -> Response {
    let mut vehicles = backend.vehicles.lock().unwrap();
    let before = vehicles.len();
    vehicles.retain(|v| v["vehicleId"] != id.as_str());
    if vehicles.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Vehicle")
    }
}

async fn list_users(State(backend): State<MockBackend>) -> Response {
    let status = *backend.users_status.lock().unwrap();
    let body = backend.users_body.lock().unwrap().clone();
    (status, Json(body)).into_response()
}

async fn create_user(State(backend): State<MockBackend>, Json(mut body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_lowercase();

    if email.contains("boom") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Falha no banco de dados" })),
        )
            .into_response();
    }
    if email.contains("silent") {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    }

    let mut users = backend.users_body.lock().unwrap();
    let exists = users
        .as_array()
        .map(|list| {
            list.iter()
                .any(|u| u["email"].as_str().map(str::to_lowercase) == Some(email.clone()))
        })
        .unwrap_or(false);
    if exists {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Email já cadastrado" })),
        )
            .into_response();
    }

    body["userID"] = json!(backend.next_id("u"));
    if let Some(list) = users.as_array_mut() {
        list.push(body.clone());
    }
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn list_histories(
    State(backend): State<MockBackend>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let histories = backend.histories.lock().unwrap().clone();
    paginate(&backend, histories, &query)
}

async fn create_history(State(backend): State<MockBackend>, Json(mut body): Json<Value>) -> Response {
    body["id"] = json!(backend.next_id("h"));
    backend.histories.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn get_history(State(backend): State<MockBackend>, Path(id): Path<String>) -> Response {
    let histories = backend.histories.lock().unwrap();
    match histories.iter().find(|h| h["id"] == id.as_str()) {
        Some(history) => Json(history.clone()).into_response(),
        None => not_found("History"),
    }
}
