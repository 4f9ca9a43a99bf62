use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::event::EventKind;
use crate::models::reservation::ReservationStatus;
use crate::models::vehicle::VehicleStatus;

// Mes consultado, formato YYYY-MM (por defecto el mes corriente)
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

// Ventana temporal explícita para costos y SLA
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// Conteo de vehículos por estado
#[derive(Debug, Serialize, FromRow)]
pub struct VehicleStatusCount {
    pub status: VehicleStatus,
    pub count: i64,
}

// Conteo de reservas por estado
#[derive(Debug, Serialize, FromRow)]
pub struct ReservationStatusCount {
    pub status: ReservationStatus,
    pub count: i64,
}

// Utilización mensual por vehículo
#[derive(Debug, Serialize, FromRow)]
pub struct UtilizationRow {
    pub vehicle_id: Uuid,
    pub plate: String,
    pub make: String,
    pub model: String,
    pub reservations: i64,
    pub hours_reserved: f64,
}

// Costos mensuales por vehículo
#[derive(Debug, Serialize, FromRow)]
pub struct VehicleCostRow {
    pub vehicle_id: Uuid,
    pub plate: String,
    pub events: i64,
    pub total: Decimal,
    pub average: Decimal,
}

// Costos mensuales por tipo de evento
#[derive(Debug, Serialize, FromRow)]
pub struct CostByKindRow {
    pub kind: EventKind,
    pub events: i64,
    pub total: Decimal,
}

// SLA de aprobación: horas entre apertura y decisión
#[derive(Debug, Serialize, FromRow)]
pub struct SlaReport {
    pub total_approved: i64,
    pub avg_hours: Option<f64>,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

// Tarjetas de resumen del tablero
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub vehicles_total: i64,
    pub vehicles_by_status: Vec<VehicleStatusCount>,
    pub reservations_pending: i64,
    pub allocations_active: i64,
    pub month_cost_total: Decimal,
}
