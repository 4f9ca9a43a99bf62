use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::event::{EventKind, VehicleEvent};

// Request para registrar un evento operativo sobre un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    pub vehicle_id: Uuid,
    pub kind: EventKind,
    pub occurred_at: Option<DateTime<Utc>>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub value: Option<Decimal>,

    #[validate(length(min = 3, max = 500))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub responsible: Option<String>,
}

// Filtros para búsqueda de eventos
#[derive(Debug, Deserialize)]
pub struct EventFilters {
    pub vehicle_id: Option<Uuid>,
    pub kind: Option<EventKind>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Response de evento
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: EventKind,
    pub occurred_at: DateTime<Utc>,
    pub value: Option<Decimal>,
    pub description: Option<String>,
    pub responsible: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<VehicleEvent> for EventResponse {
    fn from(event: VehicleEvent) -> Self {
        Self {
            id: event.id,
            vehicle_id: event.vehicle_id,
            kind: event.kind,
            occurred_at: event.occurred_at,
            value: event.value,
            description: event.description,
            responsible: event.responsible,
            created_at: event.created_at,
        }
    }
}

// Response de listado paginado
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub items: Vec<EventResponse>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}
