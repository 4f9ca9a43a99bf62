//! DTOs de la API
//!
//! Este módulo contiene los requests, responses y filtros que viajan
//! por la API REST, separados de los modelos de persistencia.

use serde::Serialize;

pub mod auth_dto;
pub mod user_dto;
pub mod vehicle_dto;
pub mod reservation_dto;
pub mod allocation_dto;
pub mod return_dto;
pub mod event_dto;
pub mod report_dto;

/// Envoltura estándar de las respuestas de mutación
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
