//! Modelo de VehicleReturn
//!
//! Este módulo contiene el struct VehicleReturn (devolución de un vehículo
//! reservado) y el checklist de inspección obligatorio.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Resultado de inspección de un ítem del checklist - mapea al ENUM checklist_condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "checklist_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCondition {
    Ok,
    Damaged,
}

impl ChecklistCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistCondition::Ok => "ok",
            ChecklistCondition::Damaged => "damaged",
        }
    }

    /// Interpreta el valor textual recibido en el checklist
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ok" => Some(ChecklistCondition::Ok),
            "damaged" => Some(ChecklistCondition::Damaged),
            _ => None,
        }
    }
}

/// VehicleReturn principal - mapea exactamente a la tabla vehicle_returns
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VehicleReturn {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub returned_by: Uuid,
    pub returned_at: DateTime<Utc>,
    pub bodywork: ChecklistCondition,
    pub tires: ChecklistCondition,
    pub engine: ChecklistCondition,
    pub odometer: Option<Decimal>,
    pub fuel_level: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_checklist_condition() {
        assert_eq!(ChecklistCondition::parse("ok"), Some(ChecklistCondition::Ok));
        assert_eq!(ChecklistCondition::parse(" OK "), Some(ChecklistCondition::Ok));
        assert_eq!(ChecklistCondition::parse("damaged"), Some(ChecklistCondition::Damaged));
        assert_eq!(ChecklistCondition::parse("Damaged"), Some(ChecklistCondition::Damaged));
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert_eq!(ChecklistCondition::parse("bien"), None);
        assert_eq!(ChecklistCondition::parse(""), None);
        assert_eq!(ChecklistCondition::parse("ok!"), None);
    }
}
