use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle_return::{ChecklistCondition, VehicleReturn};

// Request para registrar la devolución de un vehículo reservado.
// Los ítems del checklist llegan como texto libre y se validan en el
// controller para poder responder con el campo exacto que falta.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReturnRequest {
    pub reservation_id: Uuid,
    pub returned_at: Option<DateTime<Utc>>,

    pub bodywork: Option<String>,
    pub tires: Option<String>,
    pub engine: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub odometer: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub fuel_level: Option<Decimal>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

// Response de devolución
#[derive(Debug, Serialize)]
pub struct ReturnResponse {
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

impl From<VehicleReturn> for ReturnResponse {
    fn from(ret: VehicleReturn) -> Self {
        Self {
            id: ret.id,
            reservation_id: ret.reservation_id,
            returned_by: ret.returned_by,
            returned_at: ret.returned_at,
            bodywork: ret.bodywork,
            tires: ret.tires,
            engine: ret.engine,
            odometer: ret.odometer,
            fuel_level: ret.fuel_level,
            notes: ret.notes,
            created_at: ret.created_at,
        }
    }
}
