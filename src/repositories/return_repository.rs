use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::vehicle_return::{ChecklistCondition, VehicleReturn};
use crate::utils::errors::{is_unique_violation, AppError};

pub struct ReturnRepository {
    pool: PgPool,
}

impl ReturnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        db: impl PgExecutor<'_>,
        reservation_id: Uuid,
        returned_by: Uuid,
        returned_at: DateTime<Utc>,
        bodywork: ChecklistCondition,
        tires: ChecklistCondition,
        engine: ChecklistCondition,
        odometer: Option<Decimal>,
        fuel_level: Option<Decimal>,
        notes: Option<String>,
    ) -> Result<VehicleReturn, AppError> {
        let id = Uuid::new_v4();

        let vehicle_return = sqlx::query_as::<_, VehicleReturn>(
            r#"
            INSERT INTO vehicle_returns (id, reservation_id, returned_by, returned_at,
                                         bodywork, tires, engine, odometer, fuel_level, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reservation_id)
        .bind(returned_by)
        .bind(returned_at)
        .bind(bodywork)
        .bind(tires)
        .bind(engine)
        .bind(odometer)
        .bind(fuel_level)
        .bind(notes)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateReturn("La reserva ya tiene una devolución registrada".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(vehicle_return)
    }

    pub async fn find_by_reservation(&self, reservation_id: Uuid) -> Result<Option<VehicleReturn>, AppError> {
        let vehicle_return = sqlx::query_as::<_, VehicleReturn>(
            "SELECT * FROM vehicle_returns WHERE reservation_id = $1",
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle_return)
    }
}
