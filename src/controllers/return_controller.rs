//! Controller de devoluciones
//!
//! Registra la devolución del vehículo con su checklist, completa la
//! reserva y libera el vehículo, todo en una sola transacción. Una
//! reserva admite a lo sumo una devolución (índice único).

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::return_dto::{CreateReturnRequest, ReturnResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::models::vehicle::VehicleStatus;
use crate::models::vehicle_return::ChecklistCondition;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::return_repository::ReturnRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct ReturnController {
    repository: ReturnRepository,
    reservations: ReservationRepository,
    vehicles: VehicleRepository,
    audit: AuditRepository,
    pool: PgPool,
}

impl ReturnController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReturnRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn record(
        &self,
        actor: &AuthenticatedUser,
        request: CreateReturnRequest,
    ) -> Result<ApiResponse<ReturnResponse>, AppError> {
        request.validate()?;

        let reservation = self
            .reservations
            .find_by_id(request.reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if !reservation.status.can_complete() {
            return Err(AppError::InvalidTransition(format!(
                "La reserva no admite devolución (estado actual: {})",
                reservation.status.as_str()
            )));
        }

        if self
            .repository
            .find_by_reservation(reservation.id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateReturn(
                "La reserva ya tiene una devolución registrada".to_string(),
            ));
        }

        let bodywork = checklist_field("bodywork", request.bodywork.as_deref())?;
        let tires = checklist_field("tires", request.tires.as_deref())?;
        let engine = checklist_field("engine", request.engine.as_deref())?;

        let mut tx = self.pool.begin().await?;

        let inserted = self
            .repository
            .insert(
                &mut *tx,
                reservation.id,
                actor.user_id,
                request.returned_at.unwrap_or_else(Utc::now),
                bodywork,
                tires,
                engine,
                request.odometer,
                request.fuel_level,
                request.notes,
            )
            .await;

        let vehicle_return = match inserted {
            Ok(vehicle_return) => vehicle_return,
            Err(e) => {
                let _ = tx.rollback().await;
                self.audit
                    .record_failure(
                        actor.user_id,
                        AuditEntity::Return,
                        None,
                        AuditAction::ReturnRecorded,
                        e.to_string(),
                    )
                    .await;
                return Err(e);
            }
        };

        // Completa la reserva; si otro proceso la movió después del
        // chequeo inicial, el UPDATE condicional lo detecta
        let completed = self
            .reservations
            .try_complete(&mut *tx, reservation.id)
            .await?;

        if completed.is_none() {
            let _ = tx.rollback().await;
            let error = AppError::InvalidTransition(
                "La reserva ya no admite devolución".to_string(),
            );
            self.audit
                .record_failure(
                    actor.user_id,
                    AuditEntity::Return,
                    Some(reservation.id),
                    AuditAction::ReturnRecorded,
                    error.to_string(),
                )
                .await;
            return Err(error);
        }

        self.vehicles
            .try_transition_status(
                &mut *tx,
                reservation.vehicle_id,
                VehicleStatus::Reserved,
                VehicleStatus::Available,
            )
            .await?;

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Return,
                Some(vehicle_return.id),
                AuditAction::ReturnRecorded,
                AuditOutcome::Success,
                format!("Devolución registrada para la reserva {}", reservation.id),
            )
            .await?;

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Reservation,
                Some(reservation.id),
                AuditAction::ReservationCompleted,
                AuditOutcome::Success,
                "Reserva completada con la devolución del vehículo".to_string(),
            )
            .await?;

        tx.commit().await?;

        log::info!(
            "🔑 Devolución de la reserva {} registrada por {}",
            reservation.id,
            actor.email
        );

        Ok(ApiResponse::success_with_message(
            ReturnResponse::from(vehicle_return),
            "Devolución registrada exitosamente".to_string(),
        ))
    }
}

// El checklist llega como texto libre: falta el campo o trae un valor
// que no es 'ok' ni 'damaged'
fn checklist_field(name: &str, value: Option<&str>) -> Result<ChecklistCondition, AppError> {
    let raw = value.ok_or_else(|| {
        AppError::IncompleteChecklist(format!("Checklist incompleto: {} es obligatorio", name))
    })?;

    ChecklistCondition::parse(raw)
        .ok_or_else(|| AppError::IncompleteChecklist(format!("Valor inválido para {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_field_rejects_missing_field() {
        let result = checklist_field("bodywork", None);
        assert!(matches!(result, Err(AppError::IncompleteChecklist(_))));
    }

    #[test]
    fn test_checklist_field_rejects_unknown_value() {
        let result = checklist_field("tires", Some("regular"));
        assert!(matches!(result, Err(AppError::IncompleteChecklist(_))));
    }

    #[test]
    fn test_checklist_field_accepts_ok_and_damaged() {
        assert_eq!(
            checklist_field("engine", Some("ok")).unwrap(),
            ChecklistCondition::Ok
        );
        assert_eq!(
            checklist_field("engine", Some(" DAMAGED ")).unwrap(),
            ChecklistCondition::Damaged
        );
    }
}
