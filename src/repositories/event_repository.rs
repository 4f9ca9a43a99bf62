use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::dto::event_dto::EventFilters;
use crate::models::event::{EventKind, VehicleEvent};
use crate::utils::errors::AppError;

pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        db: impl PgExecutor<'_>,
        vehicle_id: Uuid,
        kind: EventKind,
        occurred_at: DateTime<Utc>,
        value: Option<Decimal>,
        description: Option<String>,
        responsible: Option<String>,
    ) -> Result<VehicleEvent, AppError> {
        let id = Uuid::new_v4();

        let event = sqlx::query_as::<_, VehicleEvent>(
            r#"
            INSERT INTO vehicle_events (id, vehicle_id, kind, occurred_at, value, description, responsible)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(kind)
        .bind(occurred_at)
        .bind(value)
        .bind(description)
        .bind(responsible)
        .fetch_one(db)
        .await?;

        Ok(event)
    }

    pub async fn list(&self, filters: &EventFilters) -> Result<(Vec<VehicleEvent>, i64), AppError> {
        let limit = filters.limit.unwrap_or(20).clamp(1, 100);
        let page = filters.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let events = sqlx::query_as::<_, VehicleEvent>(
            r#"
            SELECT * FROM vehicle_events
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
              AND ($2::event_kind IS NULL OR kind = $2)
              AND ($3::timestamptz IS NULL OR occurred_at >= $3)
              AND ($4::timestamptz IS NULL OR occurred_at < $4)
            ORDER BY occurred_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.kind)
        .bind(filters.from)
        .bind(filters.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM vehicle_events
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
              AND ($2::event_kind IS NULL OR kind = $2)
              AND ($3::timestamptz IS NULL OR occurred_at >= $3)
              AND ($4::timestamptz IS NULL OR occurred_at < $4)
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.kind)
        .bind(filters.from)
        .bind(filters.to)
        .fetch_one(&self.pool)
        .await?;

        Ok((events, total.0))
    }
}
