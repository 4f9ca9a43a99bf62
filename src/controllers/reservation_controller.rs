//! Controller de reservas
//!
//! Coordina el ciclo de vida completo: creación con toma del vehículo,
//! decisión del supervisor, retiro de llaves y cancelación. Cada cambio
//! de estado viaja en una transacción junto con su asiento de auditoría,
//! y los UPDATE condicionales del repositorio son la única defensa
//! contra carreras sobre el estado.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::reservation_dto::{
    CreateReservationRequest, RejectReservationRequest, ReservationFilters,
    ReservationListResponse, ReservationResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct ReservationController {
    repository: ReservationRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
    audit: AuditRepository,
    pool: PgPool,
}

impl ReservationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReservationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateReservationRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        request.validate()?;

        if request.ends_at <= request.starts_at {
            return Err(AppError::InvalidWindow(
                "La fecha de fin debe ser posterior a la fecha de inicio".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // El supervisor del solicitante queda fotografiado en la reserva
        let solicitant = self
            .users
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let mut tx = self.pool.begin().await?;

        // Tomar el vehículo: si otro proceso lo reservó primero, el UPDATE
        // condicional no afecta filas y la operación muere aquí
        let reserved = self
            .vehicles
            .try_transition_status(
                &mut *tx,
                vehicle.id,
                VehicleStatus::Available,
                VehicleStatus::Reserved,
            )
            .await?;

        if !reserved {
            let _ = tx.rollback().await;
            self.audit
                .record_failure(
                    actor.user_id,
                    AuditEntity::Reservation,
                    None,
                    AuditAction::ReservationCreated,
                    format!("Vehículo {} no disponible para reservar", vehicle.plate),
                )
                .await;
            return Err(AppError::VehicleUnavailable(
                "El vehículo no está disponible para reservar".to_string(),
            ));
        }

        let inserted = self
            .repository
            .insert(
                &mut *tx,
                actor.user_id,
                vehicle.id,
                solicitant.supervisor_id,
                request.starts_at,
                request.ends_at,
                request.purpose,
            )
            .await;

        let reservation = match inserted {
            Ok(reservation) => reservation,
            Err(e) => {
                let _ = tx.rollback().await;
                self.audit
                    .record_failure(
                        actor.user_id,
                        AuditEntity::Reservation,
                        None,
                        AuditAction::ReservationCreated,
                        e.to_string(),
                    )
                    .await;
                return Err(e);
            }
        };

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Reservation,
                Some(reservation.id),
                AuditAction::ReservationCreated,
                AuditOutcome::Success,
                format!("Reserva del vehículo {} creada", vehicle.plate),
            )
            .await?;

        tx.commit().await?;

        log::info!("📋 Reserva {} creada por {}", reservation.id, actor.email);

        Ok(ApiResponse::success_with_message(
            ReservationResponse::from(reservation),
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn approve(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        let approved = self.repository.try_approve(&mut *tx, id, actor.user_id).await?;

        let reservation = match approved {
            Some(reservation) => reservation,
            None => {
                let _ = tx.rollback().await;
                return Err(self
                    .decision_failure(actor, id, AuditAction::ReservationApproved)
                    .await?);
            }
        };

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Reservation,
                Some(reservation.id),
                AuditAction::ReservationApproved,
                AuditOutcome::Success,
                format!("Reserva aprobada por {}", actor.email),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            ReservationResponse::from(reservation),
            "Reserva aprobada exitosamente".to_string(),
        ))
    }

    pub async fn reject(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: RejectReservationRequest,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let reason = request
            .reason
            .filter(|reason| !reason.trim().is_empty())
            .ok_or_else(|| {
                AppError::MissingReason("El motivo es obligatorio para rechazar".to_string())
            })?;

        let mut tx = self.pool.begin().await?;

        let rejected = self
            .repository
            .try_reject(&mut *tx, id, actor.user_id, reason)
            .await?;

        let reservation = match rejected {
            Some(reservation) => reservation,
            None => {
                let _ = tx.rollback().await;
                return Err(self
                    .decision_failure(actor, id, AuditAction::ReservationRejected)
                    .await?);
            }
        };

        // Libera el vehículo salvo que un evento lo haya movido antes a
        // otro estado
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
                AuditEntity::Reservation,
                Some(reservation.id),
                AuditAction::ReservationRejected,
                AuditOutcome::Success,
                format!("Reserva rechazada por {}", actor.email),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            ReservationResponse::from(reservation),
            "Reserva rechazada".to_string(),
        ))
    }

    pub async fn start(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        self.require_owner_or_elevated(actor, current.solicitant_id)?;

        let mut tx = self.pool.begin().await?;

        let started = self.repository.try_start(&mut *tx, id).await?;

        let reservation = match started {
            Some(reservation) => reservation,
            None => {
                let _ = tx.rollback().await;
                let detail = self
                    .transition_failure(id, "La reserva no puede iniciarse")
                    .await?;
                self.audit
                    .record_failure(
                        actor.user_id,
                        AuditEntity::Reservation,
                        Some(id),
                        AuditAction::ReservationStarted,
                        detail.to_string(),
                    )
                    .await;
                return Err(detail);
            }
        };

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Reservation,
                Some(reservation.id),
                AuditAction::ReservationStarted,
                AuditOutcome::Success,
                format!("Retiro del vehículo registrado por {}", actor.email),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            ReservationResponse::from(reservation),
            "Reserva iniciada exitosamente".to_string(),
        ))
    }

    pub async fn cancel(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<ReservationResponse>, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        self.require_owner_or_elevated(actor, current.solicitant_id)?;

        let mut tx = self.pool.begin().await?;

        let cancelled = self.repository.try_cancel(&mut *tx, id).await?;

        let reservation = match cancelled {
            Some(reservation) => reservation,
            None => {
                let _ = tx.rollback().await;
                let detail = self
                    .transition_failure(id, "La reserva no puede cancelarse")
                    .await?;
                self.audit
                    .record_failure(
                        actor.user_id,
                        AuditEntity::Reservation,
                        Some(id),
                        AuditAction::ReservationCancelled,
                        detail.to_string(),
                    )
                    .await;
                return Err(detail);
            }
        };

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
                AuditEntity::Reservation,
                Some(reservation.id),
                AuditAction::ReservationCancelled,
                AuditOutcome::Success,
                format!("Reserva cancelada por {}", actor.email),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            ReservationResponse::from(reservation),
            "Reserva cancelada exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        actor: &AuthenticatedUser,
        mut filters: ReservationFilters,
    ) -> Result<ReservationListResponse, AppError> {
        // Un requester solo ve sus propias reservas
        if !actor.role.is_elevated() {
            filters.solicitant_id = Some(actor.user_id);
        }

        let limit = filters.limit.unwrap_or(20).clamp(1, 100);
        let page = filters.page.unwrap_or(1).max(1);

        let (reservations, total) = self.repository.list(&filters).await?;

        Ok(ReservationListResponse {
            items: reservations
                .into_iter()
                .map(ReservationResponse::from)
                .collect(),
            total,
            page,
            pages: (total + limit - 1) / limit,
        })
    }

    fn require_owner_or_elevated(
        &self,
        actor: &AuthenticatedUser,
        solicitant_id: Uuid,
    ) -> Result<(), AppError> {
        if !actor.role.is_elevated() && solicitant_id != actor.user_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para operar esta reserva".to_string(),
            ));
        }
        Ok(())
    }

    // Clasifica la falla de un UPDATE condicional releyendo la fila: o la
    // reserva no existe o su estado ya no admite la transición
    async fn transition_failure(&self, id: Uuid, prefix: &str) -> Result<AppError, AppError> {
        let error = match self.repository.find_by_id(id).await? {
            Some(reservation) => AppError::InvalidTransition(format!(
                "{} (estado actual: {})",
                prefix,
                reservation.status.as_str()
            )),
            None => AppError::NotFound("Reserva no encontrada".to_string()),
        };

        Ok(error)
    }

    async fn decision_failure(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        action: AuditAction,
    ) -> Result<AppError, AppError> {
        let error = self
            .transition_failure(id, "La reserva no está pendiente")
            .await?;

        self.audit
            .record_failure(
                actor.user_id,
                AuditEntity::Reservation,
                Some(id),
                action,
                error.to_string(),
            )
            .await;

        Ok(error)
    }
}
