//! Modelo de Allocation
//!
//! Este módulo contiene el struct Allocation (asignación de un vehículo
//! a un usuario por tiempo indefinido). Mapea exactamente al schema PostgreSQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la asignación - mapea al ENUM allocation_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "allocation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Active,
    Ended,
}

impl AllocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Active => "active",
            AllocationStatus::Ended => "ended",
        }
    }
}

/// Allocation principal - mapea exactamente a la tabla allocations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Allocation {
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
