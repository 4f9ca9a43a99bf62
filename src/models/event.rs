//! Modelo de VehicleEvent
//!
//! Este módulo contiene el struct VehicleEvent (mantenimiento, siniestros
//! y demás sucesos operativos) y la regla de estado forzado por tipo de evento.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::vehicle::VehicleStatus;

/// Tipo de evento operativo - mapea al ENUM event_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "event_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Maintenance,
    Wash,
    OilChange,
    TireService,
    Repair,
    Accident,
    Towing,
    Theft,
    Seizure,
    Inspection,
    Licensing,
    Other,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Maintenance => "maintenance",
            EventKind::Wash => "wash",
            EventKind::OilChange => "oil_change",
            EventKind::TireService => "tire_service",
            EventKind::Repair => "repair",
            EventKind::Accident => "accident",
            EventKind::Towing => "towing",
            EventKind::Theft => "theft",
            EventKind::Seizure => "seizure",
            EventKind::Inspection => "inspection",
            EventKind::Licensing => "licensing",
            EventKind::Other => "other",
        }
    }

    /// Estado que el evento fuerza sobre el vehículo al registrarse.
    /// Los eventos de taller lo dejan en mantenimiento; los siniestros
    /// lo sacan de circulación. El resto no toca el estado.
    pub fn forced_vehicle_status(&self) -> Option<VehicleStatus> {
        match self {
            EventKind::Maintenance | EventKind::OilChange | EventKind::TireService | EventKind::Repair => {
                Some(VehicleStatus::InMaintenance)
            }
            EventKind::Accident | EventKind::Theft | EventKind::Seizure => {
                Some(VehicleStatus::Unavailable)
            }
            _ => None,
        }
    }
}

/// VehicleEvent principal - mapea exactamente a la tabla vehicle_events
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleEvent {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: EventKind,
    pub occurred_at: DateTime<Utc>,
    pub value: Option<Decimal>,
    pub description: Option<String>,
    pub responsible: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workshop_events_force_maintenance() {
        assert_eq!(EventKind::Maintenance.forced_vehicle_status(), Some(VehicleStatus::InMaintenance));
        assert_eq!(EventKind::OilChange.forced_vehicle_status(), Some(VehicleStatus::InMaintenance));
        assert_eq!(EventKind::TireService.forced_vehicle_status(), Some(VehicleStatus::InMaintenance));
        assert_eq!(EventKind::Repair.forced_vehicle_status(), Some(VehicleStatus::InMaintenance));
    }

    #[test]
    fn test_incidents_force_unavailable() {
        assert_eq!(EventKind::Accident.forced_vehicle_status(), Some(VehicleStatus::Unavailable));
        assert_eq!(EventKind::Theft.forced_vehicle_status(), Some(VehicleStatus::Unavailable));
        assert_eq!(EventKind::Seizure.forced_vehicle_status(), Some(VehicleStatus::Unavailable));
    }

    #[test]
    fn test_neutral_events_leave_status_untouched() {
        assert_eq!(EventKind::Wash.forced_vehicle_status(), None);
        assert_eq!(EventKind::Towing.forced_vehicle_status(), None);
        assert_eq!(EventKind::Inspection.forced_vehicle_status(), None);
        assert_eq!(EventKind::Licensing.forced_vehicle_status(), None);
        assert_eq!(EventKind::Other.forced_vehicle_status(), None);
    }
}
