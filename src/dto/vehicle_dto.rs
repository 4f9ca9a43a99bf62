use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reservation::ReservationStatus;
use crate::models::vehicle::{
    DocumentKind, FuelKind, Vehicle, VehicleDocument, VehicleKind, VehicleStatus,
};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate")]
    pub plate: String,

    #[validate(length(min = 2, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub kind: VehicleKind,
    pub fuel: FuelKind,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub odometer: Option<Decimal>,
}

// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate")]
    pub plate: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub kind: Option<VehicleKind>,
    pub fuel: Option<FuelKind>,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub odometer: Option<Decimal>,

    // Edición directa de estado por gestión de flota
    pub status: Option<VehicleStatus>,
}

// Request para adjuntar un documento al vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct AttachDocumentRequest {
    pub kind: DocumentKind,

    #[validate(url)]
    pub file_url: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub file_name: Option<String>,

    pub expires_at: Option<DateTime<Utc>>,
}

// Filtros para búsqueda de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
    pub kind: Option<VehicleKind>,
    pub fuel: Option<FuelKind>,
    pub plate: Option<String>,
    pub make: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Parámetros de consulta de disponibilidad
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub kind: VehicleKind,
    pub fuel: FuelKind,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub odometer: Decimal,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate,
            make: vehicle.make,
            model: vehicle.model,
            kind: vehicle.kind,
            fuel: vehicle.fuel,
            year: vehicle.year,
            color: vehicle.color,
            odometer: vehicle.odometer,
            status: vehicle.status,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

// Response de documento adjunto
#[derive(Debug, Serialize)]
pub struct VehicleDocumentResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: DocumentKind,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleDocument> for VehicleDocumentResponse {
    fn from(doc: VehicleDocument) -> Self {
        Self {
            id: doc.id,
            vehicle_id: doc.vehicle_id,
            kind: doc.kind,
            file_url: doc.file_url,
            file_name: doc.file_name,
            expires_at: doc.expires_at,
            created_at: doc.created_at,
        }
    }
}

// Response de detalle: vehículo más sus documentos
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub documents: Vec<VehicleDocumentResponse>,
}

// Response de listado paginado
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub items: Vec<VehicleResponse>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

// Reserva que choca con la ventana consultada
#[derive(Debug, Serialize)]
pub struct ReservationConflict {
    pub reservation_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub status: ReservationStatus,
}

// Response de la consulta de disponibilidad
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub vehicle_id: Uuid,
    pub vehicle_status: VehicleStatus,
    pub available: bool,
    pub conflicts: Vec<ReservationConflict>,
    pub active_allocation_id: Option<Uuid>,
}
