//! Controller de reportes
//!
//! Agregaciones SQL de solo lectura para el tablero de gestión. No hay
//! repositorio de por medio: cada reporte es una consulta directa.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::report_dto::{
    CostByKindRow, ReservationStatusCount, SlaReport, SummaryReport, UtilizationRow,
    VehicleCostRow, VehicleStatusCount,
};
use crate::utils::errors::AppError;
use crate::utils::validation::parse_year_month;

pub struct ReportController {
    pool: PgPool,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self, month: Option<String>) -> Result<SummaryReport, AppError> {
        let (start, end) = month_window(month)?;

        let vehicles_total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        let vehicles_by_status = sqlx::query_as::<_, VehicleStatusCount>(
            "SELECT status, COUNT(*) AS count FROM vehicles GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        let reservations_pending: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reservations WHERE status = 'pending'")
                .fetch_one(&self.pool)
                .await?;

        let allocations_active: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM allocations WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;

        let month_cost_total: (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(value), 0) FROM vehicle_events
            WHERE value > 0 AND occurred_at >= $1 AND occurred_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(SummaryReport {
            vehicles_total: vehicles_total.0,
            vehicles_by_status,
            reservations_pending: reservations_pending.0,
            allocations_active: allocations_active.0,
            month_cost_total: month_cost_total.0,
        })
    }

    // Horas reservadas por vehículo sobre las reservas completadas cuyo
    // fin de ventana cae en el mes
    pub async fn utilization(&self, month: Option<String>) -> Result<Vec<UtilizationRow>, AppError> {
        let (start, end) = month_window(month)?;

        let rows = sqlx::query_as::<_, UtilizationRow>(
            r#"
            SELECT v.id AS vehicle_id, v.plate, v.make, v.model,
                   COUNT(*) AS reservations,
                   (SUM(EXTRACT(EPOCH FROM (r.ends_at - r.starts_at))) / 3600)::float8 AS hours_reserved
            FROM reservations r
            JOIN vehicles v ON v.id = r.vehicle_id
            WHERE r.status = 'completed' AND r.ends_at >= $1 AND r.ends_at < $2
            GROUP BY v.id, v.plate, v.make, v.model
            ORDER BY hours_reserved DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn costs(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<VehicleCostRow>, AppError> {
        check_window(start, end)?;

        let rows = sqlx::query_as::<_, VehicleCostRow>(
            r#"
            SELECT v.id AS vehicle_id, v.plate,
                   COUNT(*) AS events,
                   SUM(e.value) AS total,
                   ROUND(AVG(e.value), 2) AS average
            FROM vehicle_events e
            JOIN vehicles v ON v.id = e.vehicle_id
            WHERE e.value > 0 AND e.occurred_at >= $1 AND e.occurred_at < $2
            GROUP BY v.id, v.plate
            ORDER BY total DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn costs_by_kind(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CostByKindRow>, AppError> {
        check_window(start, end)?;

        let rows = sqlx::query_as::<_, CostByKindRow>(
            r#"
            SELECT e.kind, COUNT(*) AS events, SUM(e.value) AS total
            FROM vehicle_events e
            WHERE e.value > 0 AND e.occurred_at >= $1 AND e.occurred_at < $2
            GROUP BY e.kind
            ORDER BY total DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // Horas entre la apertura de la reserva y su aprobación
    pub async fn sla(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SlaReport, AppError> {
        check_window(start, end)?;

        let report = sqlx::query_as::<_, SlaReport>(
            r#"
            SELECT COUNT(*) AS total_approved,
                   (AVG(EXTRACT(EPOCH FROM (approved_at - created_at))) / 3600)::float8 AS avg_hours,
                   (MIN(EXTRACT(EPOCH FROM (approved_at - created_at))) / 3600)::float8 AS min_hours,
                   (MAX(EXTRACT(EPOCH FROM (approved_at - created_at))) / 3600)::float8 AS max_hours
            FROM reservations
            WHERE approved_at IS NOT NULL AND approved_at >= $1 AND approved_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(report)
    }

    pub async fn reservations_status(&self) -> Result<Vec<ReservationStatusCount>, AppError> {
        let rows = sqlx::query_as::<_, ReservationStatusCount>(
            "SELECT status, COUNT(*) AS count FROM reservations GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn vehicles_status(&self) -> Result<Vec<VehicleStatusCount>, AppError> {
        let rows = sqlx::query_as::<_, VehicleStatusCount>(
            "SELECT status, COUNT(*) AS count FROM vehicles GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// Resuelve el mes consultado al rango [inicio, fin); por defecto el mes
// corriente
fn month_window(month: Option<String>) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let month = month.unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());

    parse_year_month(&month).map_err(|_| {
        AppError::BadRequest("El parámetro month debe tener formato YYYY-MM".to_string())
    })
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::InvalidWindow(
            "La fecha de fin debe ser posterior a la fecha de inicio".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_month_window_defaults_to_current_month() {
        let (start, end) = month_window(None).expect("mes corriente válido");
        let now = Utc::now();
        assert_eq!(start.month(), now.month());
        assert_eq!(start.day(), 1);
        assert!(end > start);
    }

    #[test]
    fn test_month_window_rejects_bad_format() {
        let result = month_window(Some("2025/03".to_string()));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_check_window_rejects_inverted_range() {
        let start = Utc::now();
        let end = start - chrono::Duration::hours(1);
        assert!(matches!(
            check_window(start, end),
            Err(AppError::InvalidWindow(_))
        ));
        assert!(check_window(end, start).is_ok());
    }
}
