//! Modelo de Reservation
//!
//! Este módulo contiene el struct Reservation y su máquina de estados.
//! Las transiciones válidas son:
//! pending -> approved | rejected | cancelled
//! approved -> in_use | completed | cancelled
//! in_use -> completed | cancelled
//! rejected, completed y cancelled son estados terminales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM reservation_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    InUse,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::InUse => "in_use",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Estados que no admiten ninguna transición posterior
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Rejected | ReservationStatus::Completed | ReservationStatus::Cancelled
        )
    }

    /// Estados desde los que se puede registrar la devolución del vehículo
    pub fn can_complete(&self) -> bool {
        matches!(self, ReservationStatus::Approved | ReservationStatus::InUse)
    }

    /// Estados que mantienen la reserva viva (y el vehículo comprometido)
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// Reservation principal - mapea exactamente a la tabla reservations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(ReservationStatus::Rejected.is_terminal());
        assert!(ReservationStatus::Completed.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
        assert!(!ReservationStatus::Pending.is_terminal());
        assert!(!ReservationStatus::Approved.is_terminal());
        assert!(!ReservationStatus::InUse.is_terminal());
    }

    #[test]
    fn test_states_that_accept_return() {
        assert!(ReservationStatus::Approved.can_complete());
        assert!(ReservationStatus::InUse.can_complete());
        assert!(!ReservationStatus::Pending.can_complete());
        assert!(!ReservationStatus::Completed.can_complete());
        assert!(!ReservationStatus::Cancelled.can_complete());
        assert!(!ReservationStatus::Rejected.can_complete());
    }

    #[test]
    fn test_active_states_keep_vehicle_committed() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Approved.is_active());
        assert!(ReservationStatus::InUse.is_active());
        assert!(!ReservationStatus::Completed.is_active());
    }
}
