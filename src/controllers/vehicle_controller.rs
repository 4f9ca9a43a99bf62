//! Controller de vehículos
//!
//! Inventario de flota: alta, edición, retiro definitivo, documentos
//! y la consulta de disponibilidad por ventana de tiempo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    AttachDocumentRequest, AvailabilityResponse, CreateVehicleRequest, ReservationConflict,
    UpdateVehicleRequest, VehicleDetailResponse, VehicleDocumentResponse, VehicleFilters,
    VehicleListResponse, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::allocation_repository::AllocationRepository;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: VehicleRepository,
    reservations: ReservationRepository,
    allocations: AllocationRepository,
    audit: AuditRepository,
    pool: PgPool,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            reservations: ReservationRepository::new(pool.clone()),
            allocations: AllocationRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        // Verificar que la matrícula no exista
        if self.repository.plate_exists(&request.plate, None).await? {
            return Err(AppError::Conflict("La matrícula ya está registrada".to_string()));
        }

        let vehicle = self
            .repository
            .create(
                request.plate,
                request.make,
                request.model,
                request.kind,
                request.fuel,
                request.year,
                request.color,
                request.odometer.unwrap_or(Decimal::ZERO),
            )
            .await?;

        self.audit
            .record(
                &self.pool,
                actor.user_id,
                AuditEntity::Vehicle,
                Some(vehicle.id),
                AuditAction::VehicleCreated,
                AuditOutcome::Success,
                format!("Vehículo {} dado de alta", vehicle.plate),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleDetailResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let documents = self.repository.documents_for(id).await?;

        Ok(VehicleDetailResponse {
            vehicle: VehicleResponse::from(vehicle),
            documents: documents
                .into_iter()
                .map(VehicleDocumentResponse::from)
                .collect(),
        })
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<VehicleListResponse, AppError> {
        let limit = filters.limit.unwrap_or(20).clamp(1, 100);
        let page = filters.page.unwrap_or(1).max(1);

        let (vehicles, total) = self.repository.list(&filters).await?;

        Ok(VehicleListResponse {
            items: vehicles.into_iter().map(VehicleResponse::from).collect(),
            total,
            page,
            pages: (total + limit - 1) / limit,
        })
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if let Some(plate) = &request.plate {
            if self.repository.plate_exists(plate, Some(id)).await? {
                return Err(AppError::Conflict("La matrícula ya está registrada".to_string()));
            }
        }

        let vehicle = self.repository.update(&current, request).await?;

        self.audit
            .record(
                &self.pool,
                actor.user_id,
                AuditEntity::Vehicle,
                Some(vehicle.id),
                AuditAction::VehicleUpdated,
                AuditOutcome::Success,
                format!("Vehículo {} actualizado", vehicle.plate),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    // Retiro definitivo de flota. El UPDATE condicional del repositorio
    // es quien decide si el vehículo sigue comprometido.
    pub async fn retire(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let mut tx = self.pool.begin().await?;

        let retired = self.repository.try_retire(&mut *tx, id).await?;

        let vehicle = match retired {
            Some(vehicle) => vehicle,
            None => {
                let _ = tx.rollback().await;
                return match self.repository.find_by_id(id).await? {
                    Some(_) => Err(AppError::InvalidTransition(
                        "El vehículo no puede retirarse mientras está reservado o asignado"
                            .to_string(),
                    )),
                    None => Err(AppError::NotFound("Vehículo no encontrado".to_string())),
                };
            }
        };

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Vehicle,
                Some(vehicle.id),
                AuditAction::VehicleRetired,
                AuditOutcome::Success,
                format!("Vehículo {} retirado de la flota", vehicle.plate),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo retirado exitosamente".to_string(),
        ))
    }

    // Consulta de disponibilidad: reservas vivas que pisan la ventana
    // más la asignación activa, si la hay
    pub async fn availability(
        &self,
        id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AvailabilityResponse, AppError> {
        if end <= start {
            return Err(AppError::InvalidWindow(
                "La fecha de fin debe ser posterior a la fecha de inicio".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let overlapping = self.reservations.overlapping(id, start, end).await?;
        let active_allocation = self.allocations.find_active_by_vehicle(id).await?;

        let conflicts: Vec<ReservationConflict> = overlapping
            .into_iter()
            .map(|r| ReservationConflict {
                reservation_id: r.id,
                starts_at: r.starts_at,
                ends_at: r.ends_at,
                status: r.status,
            })
            .collect();

        let available = conflicts.is_empty()
            && active_allocation.is_none()
            && vehicle.status == VehicleStatus::Available;

        Ok(AvailabilityResponse {
            vehicle_id: vehicle.id,
            vehicle_status: vehicle.status,
            available,
            conflicts,
            active_allocation_id: active_allocation.map(|a| a.id),
        })
    }

    pub async fn add_document(
        &self,
        actor: &AuthenticatedUser,
        vehicle_id: Uuid,
        request: AttachDocumentRequest,
    ) -> Result<ApiResponse<VehicleDocumentResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let document = self
            .repository
            .add_document(
                &mut *tx,
                vehicle.id,
                request.kind,
                request.file_url,
                request.file_name,
                request.expires_at,
            )
            .await?;

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Document,
                Some(document.id),
                AuditAction::DocumentAttached,
                AuditOutcome::Success,
                format!("Documento adjuntado al vehículo {}", vehicle.plate),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            VehicleDocumentResponse::from(document),
            "Documento adjuntado exitosamente".to_string(),
        ))
    }
}
