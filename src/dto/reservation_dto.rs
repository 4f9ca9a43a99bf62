use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::reservation::{Reservation, ReservationStatus};

// Request para abrir una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub vehicle_id: Uuid,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,

    #[validate(length(min = 3, max = 500))]
    pub purpose: String,
}

// Request para rechazar una reserva pendiente
#[derive(Debug, Deserialize)]
pub struct RejectReservationRequest {
    pub reason: Option<String>,
}

// Filtros para búsqueda de reservas
#[derive(Debug, Deserialize)]
pub struct ReservationFilters {
    pub status: Option<ReservationStatus>,
    pub vehicle_id: Option<Uuid>,
    pub solicitant_id: Option<Uuid>,
    pub supervisor_id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// Response de reserva
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub solicitant_id: Uuid,
    pub vehicle_id: Uuid,
    pub supervisor_id: Option<Uuid>,
    pub approver_id: Option<Uuid>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub purpose: String,
    pub status: ReservationStatus,
    pub rejection_reason: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            solicitant_id: reservation.solicitant_id,
            vehicle_id: reservation.vehicle_id,
            supervisor_id: reservation.supervisor_id,
            approver_id: reservation.approver_id,
            starts_at: reservation.starts_at,
            ends_at: reservation.ends_at,
            purpose: reservation.purpose,
            status: reservation.status,
            rejection_reason: reservation.rejection_reason,
            approved_at: reservation.approved_at,
            created_at: reservation.created_at,
            updated_at: reservation.updated_at,
        }
    }
}

// Response de listado paginado
#[derive(Debug, Serialize)]
pub struct ReservationListResponse {
    pub items: Vec<ReservationResponse>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}
