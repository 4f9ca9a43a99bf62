use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::dto::reservation_dto::ReservationFilters;
use crate::models::reservation::Reservation;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        db: impl PgExecutor<'_>,
        solicitant_id: Uuid,
        vehicle_id: Uuid,
        supervisor_id: Option<Uuid>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        purpose: String,
    ) -> Result<Reservation, AppError> {
        let id = Uuid::new_v4();

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (id, solicitant_id, vehicle_id, supervisor_id, starts_at, ends_at, purpose, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(solicitant_id)
        .bind(vehicle_id)
        .bind(supervisor_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(purpose)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::VehicleUnavailable("El vehículo ya tiene una reserva viva".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(reservation)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reservation)
    }

    pub async fn list(&self, filters: &ReservationFilters) -> Result<(Vec<Reservation>, i64), AppError> {
        let limit = filters.limit.unwrap_or(20).clamp(1, 100);
        let page = filters.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE ($1::reservation_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::uuid IS NULL OR solicitant_id = $3)
              AND ($4::uuid IS NULL OR supervisor_id = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filters.status)
        .bind(filters.vehicle_id)
        .bind(filters.solicitant_id)
        .bind(filters.supervisor_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM reservations
            WHERE ($1::reservation_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR vehicle_id = $2)
              AND ($3::uuid IS NULL OR solicitant_id = $3)
              AND ($4::uuid IS NULL OR supervisor_id = $4)
            "#,
        )
        .bind(filters.status)
        .bind(filters.vehicle_id)
        .bind(filters.solicitant_id)
        .bind(filters.supervisor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((reservations, total.0))
    }

    // Reservas vivas que chocan con la ventana [start, end)
    pub async fn overlapping(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservations
            WHERE vehicle_id = $1
              AND status IN ('pending', 'approved', 'in_use')
              AND starts_at < $3
              AND ends_at > $2
            ORDER BY starts_at
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    // Las transiciones siguientes son condicionales: devuelven None cuando
    // la reserva no está en el estado de partida esperado, y el coordinador
    // traduce ese None a InvalidTransition.

    pub async fn try_approve(
        &self,
        db: impl PgExecutor<'_>,
        id: Uuid,
        approver_id: Uuid,
    ) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'approved', approver_id = $2, approved_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(approver_id)
        .fetch_optional(db)
        .await?;

        Ok(reservation)
    }

    pub async fn try_reject(
        &self,
        db: impl PgExecutor<'_>,
        id: Uuid,
        approver_id: Uuid,
        reason: String,
    ) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'rejected', approver_id = $2, rejection_reason = $3, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(approver_id)
        .bind(reason)
        .fetch_optional(db)
        .await?;

        Ok(reservation)
    }

    pub async fn try_start(&self, db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'in_use', updated_at = NOW()
            WHERE id = $1 AND status = 'approved'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(reservation)
    }

    pub async fn try_cancel(&self, db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'cancelled', updated_at = NOW()
            WHERE id = $1 AND status IN ('pending', 'approved', 'in_use')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(reservation)
    }

    pub async fn try_complete(&self, db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Reservation>, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE reservations
            SET status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status IN ('approved', 'in_use')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(reservation)
    }
}
