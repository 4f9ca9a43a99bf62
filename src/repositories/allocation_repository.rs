use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::dto::allocation_dto::{AllocationFilters, UpdateAllocationRequest};
use crate::models::allocation::Allocation;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct AllocationRepository {
    pool: PgPool,
}

impl AllocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        db: impl PgExecutor<'_>,
        user_id: Uuid,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        weekend_use: bool,
        parking_location: Option<String>,
        priority: i32,
        justification: Option<String>,
    ) -> Result<Allocation, AppError> {
        let id = Uuid::new_v4();

        let allocation = sqlx::query_as::<_, Allocation>(
            r#"
            INSERT INTO allocations (id, user_id, vehicle_id, driver_id, status, starts_at, ends_at,
                                     weekend_use, parking_location, priority, justification)
            VALUES ($1, $2, $3, $4, 'active', $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(vehicle_id)
        .bind(driver_id)
        .bind(starts_at)
        .bind(ends_at)
        .bind(weekend_use)
        .bind(parking_location)
        .bind(priority)
        .bind(justification)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateActiveAllocation(
                    "El usuario o el vehículo ya tienen una asignación activa".to_string(),
                )
            } else {
                AppError::from(e)
            }
        })?;

        Ok(allocation)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Allocation>, AppError> {
        let allocation = sqlx::query_as::<_, Allocation>("SELECT * FROM allocations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(allocation)
    }

    pub async fn find_active_by_user(&self, user_id: Uuid) -> Result<Option<Allocation>, AppError> {
        let allocation = sqlx::query_as::<_, Allocation>(
            "SELECT * FROM allocations WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(allocation)
    }

    pub async fn find_active_by_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Allocation>, AppError> {
        let allocation = sqlx::query_as::<_, Allocation>(
            "SELECT * FROM allocations WHERE vehicle_id = $1 AND status = 'active'",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(allocation)
    }

    pub async fn list(&self, filters: &AllocationFilters) -> Result<Vec<Allocation>, AppError> {
        let allocations = sqlx::query_as::<_, Allocation>(
            r#"
            SELECT * FROM allocations
            WHERE ($1::allocation_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR user_id = $2)
              AND ($3::uuid IS NULL OR vehicle_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filters.status)
        .bind(filters.user_id)
        .bind(filters.vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(allocations)
    }

    pub async fn update(
        &self,
        current: &Allocation,
        changes: UpdateAllocationRequest,
    ) -> Result<Allocation, AppError> {
        let allocation = sqlx::query_as::<_, Allocation>(
            r#"
            UPDATE allocations
            SET driver_id = $2, ends_at = $3, weekend_use = $4, parking_location = $5,
                priority = $6, justification = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(changes.driver_id.or(current.driver_id))
        .bind(changes.ends_at.or(current.ends_at))
        .bind(changes.weekend_use.unwrap_or(current.weekend_use))
        .bind(changes.parking_location.or_else(|| current.parking_location.clone()))
        .bind(changes.priority.unwrap_or(current.priority))
        .bind(changes.justification.or_else(|| current.justification.clone()))
        .fetch_one(&self.pool)
        .await?;

        Ok(allocation)
    }

    // Cierre condicional: None si la asignación ya estaba finalizada
    pub async fn try_end(&self, db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Allocation>, AppError> {
        let allocation = sqlx::query_as::<_, Allocation>(
            r#"
            UPDATE allocations
            SET status = 'ended', ends_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(allocation)
    }
}
