use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::allocation::{Allocation, AllocationStatus};

// Request para crear una asignación de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAllocationRequest {
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub weekend_use: Option<bool>,

    #[validate(length(min = 2, max = 200))]
    pub parking_location: Option<String>,

    #[validate(range(min = 0, max = 10))]
    pub priority: Option<i32>,

    #[validate(length(min = 3, max = 500))]
    pub justification: Option<String>,
}

// Request para actualizar una asignación activa
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAllocationRequest {
    pub driver_id: Option<Uuid>,
    pub ends_at: Option<DateTime<Utc>>,
    pub weekend_use: Option<bool>,

    #[validate(length(min = 2, max = 200))]
    pub parking_location: Option<String>,

    #[validate(range(min = 0, max = 10))]
    pub priority: Option<i32>,

    #[validate(length(min = 3, max = 500))]
    pub justification: Option<String>,
}

// Filtros para búsqueda de asignaciones
#[derive(Debug, Deserialize)]
pub struct AllocationFilters {
    pub status: Option<AllocationStatus>,
    pub user_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
}

// Response de asignación
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub status: AllocationStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub weekend_use: bool,
    pub parking_location: Option<String>,
    pub priority: i32,
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Allocation> for AllocationResponse {
    fn from(allocation: Allocation) -> Self {
        Self {
            id: allocation.id,
            user_id: allocation.user_id,
            vehicle_id: allocation.vehicle_id,
            driver_id: allocation.driver_id,
            status: allocation.status,
            starts_at: allocation.starts_at,
            ends_at: allocation.ends_at,
            weekend_use: allocation.weekend_use,
            parking_location: allocation.parking_location,
            priority: allocation.priority,
            justification: allocation.justification,
            created_at: allocation.created_at,
            updated_at: allocation.updated_at,
        }
    }
}
