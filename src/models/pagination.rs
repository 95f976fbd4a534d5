//! Paginación de los listados
//!
//! Los listados aceptan `page` (base 1) y `pageSize` como query string. El
//! total de páginas viaja fuera de banda en el header `x-pagination`.

use serde::{Deserialize, Serialize};

/// Nombre del header de paginación
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Parámetros de paginación opcionales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Pares presentes en el orden `page`, `pageSize`
    ///
    /// Un cero cuenta como ausente; el resto no se valida aquí.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(page) = self.page.filter(|p| *p > 0) {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            pairs.push(("pageSize", size.to_string()));
        }
        pairs
    }

    /// Query string sin `?` inicial; vacía si no hay parámetros
    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Contenido del header `x-pagination`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    #[serde(rename = "TotalPages")]
    pub total_pages: u32,
    #[serde(rename = "TotalCount", default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(rename = "CurrentPage", default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    #[serde(rename = "PageSize", default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl PaginationMetadata {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// Página de resultados resuelta
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.page.unwrap_or(1) < self.total_pages
    }
}

/// Estimación de páginas a partir del tamaño de la respuesta
///
/// Sólo es correcta cuando el servidor devuelve la colección entera; con un
/// slice de página subestima el total.
pub fn estimate_total_pages(item_count: usize, page_size: Option<u32>) -> u32 {
    match page_size.filter(|s| *s > 0) {
        Some(size) => {
            let pages = (item_count as u64).div_ceil(size as u64);
            pages.clamp(1, u32::MAX as u64) as u32
        }
        None => 1,
    }
}
