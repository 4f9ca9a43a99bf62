//! Controller de asignaciones
//!
//! Asignaciones de largo plazo de un vehículo a un usuario, con motorista
//! exclusivo opcional. Las reglas duras son una asignación activa por
//! usuario y por vehículo, respaldadas por índices únicos parciales.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::allocation_dto::{
    AllocationFilters, AllocationResponse, CreateAllocationRequest, UpdateAllocationRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::allocation_repository::AllocationRepository;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct AllocationController {
    repository: AllocationRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
    audit: AuditRepository,
    pool: PgPool,
}

impl AllocationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AllocationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateAllocationRequest,
    ) -> Result<ApiResponse<AllocationResponse>, AppError> {
        request.validate()?;

        let beneficiary = self
            .users
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario beneficiario no encontrado".to_string()))?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if let Some(driver_id) = request.driver_id {
            self.users
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("Motorista exclusivo no encontrado".to_string())
                })?;
        }

        // Chequeos previos con mensaje claro; el índice único parcial
        // sigue siendo la defensa contra la carrera
        if self
            .repository
            .find_active_by_user(beneficiary.id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateActiveAllocation(
                "El usuario ya tiene una asignación activa".to_string(),
            ));
        }

        if self
            .repository
            .find_active_by_vehicle(vehicle.id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateActiveAllocation(
                "El vehículo ya está asignado a otro usuario".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let allocated = self
            .vehicles
            .try_transition_status(
                &mut *tx,
                vehicle.id,
                VehicleStatus::Available,
                VehicleStatus::Allocated,
            )
            .await?;

        if !allocated {
            let _ = tx.rollback().await;
            self.audit
                .record_failure(
                    actor.user_id,
                    AuditEntity::Allocation,
                    None,
                    AuditAction::AllocationCreated,
                    format!("Vehículo {} no disponible para asignar", vehicle.plate),
                )
                .await;
            return Err(AppError::VehicleUnavailable(
                "El vehículo no está disponible para asignar".to_string(),
            ));
        }

        let inserted = self
            .repository
            .insert(
                &mut *tx,
                beneficiary.id,
                vehicle.id,
                request.driver_id,
                request.starts_at.unwrap_or_else(Utc::now),
                request.ends_at,
                request.weekend_use.unwrap_or(false),
                request.parking_location,
                request.priority.unwrap_or(0),
                request.justification,
            )
            .await;

        let allocation = match inserted {
            Ok(allocation) => allocation,
            Err(e) => {
                let _ = tx.rollback().await;
                self.audit
                    .record_failure(
                        actor.user_id,
                        AuditEntity::Allocation,
                        None,
                        AuditAction::AllocationCreated,
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
                AuditEntity::Allocation,
                Some(allocation.id),
                AuditAction::AllocationCreated,
                AuditOutcome::Success,
                format!(
                    "Vehículo {} asignado a {}",
                    vehicle.plate, beneficiary.name
                ),
            )
            .await?;

        tx.commit().await?;

        log::info!(
            "🚗 Vehículo {} asignado a {} por {}",
            vehicle.plate,
            beneficiary.email,
            actor.email
        );

        Ok(ApiResponse::success_with_message(
            AllocationResponse::from(allocation),
            "Asignación creada exitosamente".to_string(),
        ))
    }

    pub async fn list(
        &self,
        filters: AllocationFilters,
    ) -> Result<Vec<AllocationResponse>, AppError> {
        let allocations = self.repository.list(&filters).await?;

        Ok(allocations
            .into_iter()
            .map(AllocationResponse::from)
            .collect())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateAllocationRequest,
    ) -> Result<ApiResponse<AllocationResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        if let Some(driver_id) = request.driver_id {
            self.users
                .find_by_id(driver_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("Motorista exclusivo no encontrado".to_string())
                })?;
        }

        let allocation = self.repository.update(&current, request).await?;

        self.audit
            .record(
                &self.pool,
                actor.user_id,
                AuditEntity::Allocation,
                Some(allocation.id),
                AuditAction::AllocationUpdated,
                AuditOutcome::Success,
                "Asignación actualizada".to_string(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            AllocationResponse::from(allocation),
            "Asignación actualizada exitosamente".to_string(),
        ))
    }

    pub async fn end(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<AllocationResponse>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asignación no encontrada".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let ended = self.repository.try_end(&mut *tx, id).await?;

        let allocation = match ended {
            Some(allocation) => allocation,
            None => {
                let _ = tx.rollback().await;
                self.audit
                    .record_failure(
                        actor.user_id,
                        AuditEntity::Allocation,
                        Some(id),
                        AuditAction::AllocationEnded,
                        "La asignación ya fue finalizada".to_string(),
                    )
                    .await;
                return Err(AppError::InvalidTransition(
                    "La asignación ya fue finalizada".to_string(),
                ));
            }
        };

        // Devuelve el vehículo al pool disponible salvo que un evento lo
        // haya movido a otro estado
        self.vehicles
            .try_transition_status(
                &mut *tx,
                allocation.vehicle_id,
                VehicleStatus::Allocated,
                VehicleStatus::Available,
            )
            .await?;

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Allocation,
                Some(allocation.id),
                AuditAction::AllocationEnded,
                AuditOutcome::Success,
                format!("Asignación finalizada por {}", actor.email),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            AllocationResponse::from(allocation),
            "Asignación finalizada exitosamente".to_string(),
        ))
    }
}
