//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, sus estados de ciclo de vida
//! y los documentos asociados. Mapea exactamente al schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Allocated,
    InMaintenance,
    Unavailable,
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Allocated => "allocated",
            VehicleStatus::InMaintenance => "in_maintenance",
            VehicleStatus::Unavailable => "unavailable",
            VehicleStatus::Retired => "retired",
        }
    }

    /// Un vehículo comprometido por una reserva o asignación viva
    /// no puede retirarse de circulación
    pub fn is_committed(&self) -> bool {
        matches!(self, VehicleStatus::Reserved | VehicleStatus::Allocated)
    }
}

/// Tipo de vehículo - mapea al ENUM vehicle_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Car,
    Motorcycle,
    Van,
    Truck,
    Other,
}

/// Tipo de combustible - mapea al ENUM fuel_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fuel_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    Gasoline,
    Ethanol,
    Diesel,
    Flex,
    Electric,
    Hybrid,
    NaturalGas,
    Other,
}

/// Tipo de documento del vehículo - mapea al ENUM document_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "document_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Registration,
    Insurance,
    Manual,
    InspectionReport,
    Other,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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

/// Documento adjunto a un vehículo - mapea a la tabla vehicle_documents
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleDocument {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub kind: DocumentKind,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committed_statuses_block_retirement() {
        assert!(VehicleStatus::Reserved.is_committed());
        assert!(VehicleStatus::Allocated.is_committed());
        assert!(!VehicleStatus::Available.is_committed());
        assert!(!VehicleStatus::InMaintenance.is_committed());
        assert!(!VehicleStatus::Retired.is_committed());
    }
}
