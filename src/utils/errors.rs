//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Vehicle unavailable: {0}")]
    VehicleUnavailable(String),

    #[error("Duplicate active allocation: {0}")]
    DuplicateActiveAllocation(String),

    #[error("Duplicate return: {0}")]
    DuplicateReturn(String),

    #[error("Incomplete checklist: {0}")]
    IncompleteChecklist(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Missing reason: {0}")]
    MissingReason(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::StorageUnavailable(e) => {
                eprintln!("Storage error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Storage Unavailable".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("STORAGE_UNAVAILABLE".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                eprintln!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                eprintln!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                eprintln!("Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message: msg,
                        details: None,
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                eprintln!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                eprintln!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::InvalidTransition(msg) => {
                eprintln!("Invalid transition: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Invalid Transition".to_string(),
                        message: msg,
                        details: None,
                        code: Some("INVALID_TRANSITION".to_string()),
                    },
                )
            }

            AppError::VehicleUnavailable(msg) => {
                eprintln!("Vehicle unavailable: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Vehicle Unavailable".to_string(),
                        message: msg,
                        details: None,
                        code: Some("VEHICLE_UNAVAILABLE".to_string()),
                    },
                )
            }

            AppError::DuplicateActiveAllocation(msg) => {
                eprintln!("Duplicate active allocation: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Duplicate Active Allocation".to_string(),
                        message: msg,
                        details: None,
                        code: Some("DUPLICATE_ACTIVE_ALLOCATION".to_string()),
                    },
                )
            }

            AppError::DuplicateReturn(msg) => {
                eprintln!("Duplicate return: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Duplicate Return".to_string(),
                        message: msg,
                        details: None,
                        code: Some("DUPLICATE_RETURN".to_string()),
                    },
                )
            }

            AppError::IncompleteChecklist(msg) => {
                eprintln!("Incomplete checklist: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Incomplete Checklist".to_string(),
                        message: msg,
                        details: None,
                        code: Some("INCOMPLETE_CHECKLIST".to_string()),
                    },
                )
            }

            AppError::InvalidWindow(msg) => {
                eprintln!("Invalid window: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid Window".to_string(),
                        message: msg,
                        details: None,
                        code: Some("INVALID_WINDOW".to_string()),
                    },
                )
            }

            AppError::MissingReason(msg) => {
                eprintln!("Missing reason: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Missing Reason".to_string(),
                        message: msg,
                        details: None,
                        code: Some("MISSING_REASON".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                eprintln!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                eprintln!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }

            AppError::Jwt(msg) => {
                eprintln!("JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "JWT Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("JWT_ERROR".to_string()),
                    },
                )
            }

            AppError::Hash(msg) => {
                eprintln!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Hash Error".to_string(),
                        message: "An error occurred while processing credentials".to_string(),
                        details: Some(json!({ "hash_error": msg })),
                        code: Some("HASH_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("Ya existe {} con {} '{}'", resource, field, value))
}

/// Detecta violaciones de índices únicos de PostgreSQL
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_conflict_family_maps_to_409() {
        assert_eq!(status_of(AppError::InvalidTransition("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::VehicleUnavailable("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::DuplicateActiveAllocation("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::DuplicateReturn("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(AppError::Conflict("x".into())), StatusCode::CONFLICT);
    }

    #[test]
    fn test_client_errors_map_to_400() {
        assert_eq!(status_of(AppError::IncompleteChecklist("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::InvalidWindow("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::MissingReason("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(status_of(AppError::Unauthorized("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::Jwt("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::Forbidden("x".into())), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_storage_maps_to_503() {
        assert_eq!(
            status_of(AppError::StorageUnavailable(sqlx::Error::PoolClosed)),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_not_found_helper() {
        let err = not_found_error("Vehículo", "abc");
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }
}
