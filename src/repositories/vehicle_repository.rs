use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::dto::vehicle_dto::{UpdateVehicleRequest, VehicleFilters};
use crate::models::vehicle::{
    DocumentKind, FuelKind, Vehicle, VehicleDocument, VehicleKind, VehicleStatus,
};
use crate::utils::errors::{is_unique_violation, AppError};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        plate: String,
        make: String,
        model: String,
        kind: VehicleKind,
        fuel: FuelKind,
        year: Option<i32>,
        color: Option<String>,
        odometer: Decimal,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate, make, model, kind, fuel, year, color, odometer, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'available')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate)
        .bind(make)
        .bind(model)
        .bind(kind)
        .bind(fuel)
        .bind(year)
        .bind(color)
        .bind(odometer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("La matrícula ya está registrada".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn plate_exists(&self, plate: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1 AND ($2::uuid IS NULL OR id != $2))",
        )
        .bind(plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<(Vec<Vehicle>, i64), AppError> {
        let limit = filters.limit.unwrap_or(20).clamp(1, 100);
        let page = filters.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
              AND ($2::vehicle_kind IS NULL OR kind = $2)
              AND ($3::fuel_kind IS NULL OR fuel = $3)
              AND ($4::text IS NULL OR plate ILIKE '%' || $4 || '%')
              AND ($5::text IS NULL OR make ILIKE '%' || $5 || '%')
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filters.status)
        .bind(filters.kind)
        .bind(filters.fuel)
        .bind(filters.plate.as_deref())
        .bind(filters.make.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
              AND ($2::vehicle_kind IS NULL OR kind = $2)
              AND ($3::fuel_kind IS NULL OR fuel = $3)
              AND ($4::text IS NULL OR plate ILIKE '%' || $4 || '%')
              AND ($5::text IS NULL OR make ILIKE '%' || $5 || '%')
            "#,
        )
        .bind(filters.status)
        .bind(filters.kind)
        .bind(filters.fuel)
        .bind(filters.plate.as_deref())
        .bind(filters.make.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok((vehicles, total.0))
    }

    pub async fn update(&self, current: &Vehicle, changes: UpdateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate = $2, make = $3, model = $4, kind = $5, fuel = $6,
                year = $7, color = $8, odometer = $9, status = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(changes.plate.unwrap_or_else(|| current.plate.clone()))
        .bind(changes.make.unwrap_or_else(|| current.make.clone()))
        .bind(changes.model.unwrap_or_else(|| current.model.clone()))
        .bind(changes.kind.unwrap_or(current.kind))
        .bind(changes.fuel.unwrap_or(current.fuel))
        .bind(changes.year.or(current.year))
        .bind(changes.color.or_else(|| current.color.clone()))
        .bind(changes.odometer.unwrap_or(current.odometer))
        .bind(changes.status.unwrap_or(current.status))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("La matrícula ya está registrada".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(vehicle)
    }

    // Escritura directa de estado, usada por los coordinadores dentro
    // de sus transacciones
    pub async fn set_status(
        &self,
        db: impl PgExecutor<'_>,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE vehicles SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehículo con id '{}' no encontrado", id)));
        }

        Ok(())
    }

    // Transición condicional estado-a-estado. Devuelve false si otro
    // proceso ganó la carrera y el estado ya no es el esperado.
    pub async fn try_transition_status(
        &self,
        db: impl PgExecutor<'_>,
        id: Uuid,
        from: VehicleStatus,
        to: VehicleStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE vehicles SET status = $3, updated_at = NOW() WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .execute(db)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    // Retiro definitivo: falla si el vehículo está comprometido por una
    // reserva o asignación viva
    pub async fn try_retire(&self, db: impl PgExecutor<'_>, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET status = 'retired', updated_at = NOW()
            WHERE id = $1 AND status NOT IN ('reserved', 'allocated')
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(vehicle)
    }

    pub async fn add_document(
        &self,
        db: impl PgExecutor<'_>,
        vehicle_id: Uuid,
        kind: DocumentKind,
        file_url: Option<String>,
        file_name: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<VehicleDocument, AppError> {
        let id = Uuid::new_v4();

        let document = sqlx::query_as::<_, VehicleDocument>(
            r#"
            INSERT INTO vehicle_documents (id, vehicle_id, kind, file_url, file_name, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(kind)
        .bind(file_url)
        .bind(file_name)
        .bind(expires_at)
        .fetch_one(db)
        .await?;

        Ok(document)
    }

    pub async fn documents_for(&self, vehicle_id: Uuid) -> Result<Vec<VehicleDocument>, AppError> {
        let documents = sqlx::query_as::<_, VehicleDocument>(
            "SELECT * FROM vehicle_documents WHERE vehicle_id = $1 ORDER BY created_at DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }
}
