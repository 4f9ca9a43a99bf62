//! Controller de eventos de vehículo
//!
//! Mantenimientos, siniestros y trámites. Algunos tipos de evento fuerzan
//! el estado del vehículo (taller o fuera de servicio) en la misma
//! transacción del registro.

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::event_dto::{CreateEventRequest, EventFilters, EventListResponse, EventResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct EventController {
    repository: EventRepository,
    vehicles: VehicleRepository,
    audit: AuditRepository,
    pool: PgPool,
}

impl EventController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EventRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateEventRequest,
    ) -> Result<ApiResponse<EventResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let mut tx = self.pool.begin().await?;

        let event = self
            .repository
            .insert(
                &mut *tx,
                vehicle.id,
                request.kind,
                request.occurred_at.unwrap_or_else(Utc::now),
                request.value,
                request.description,
                request.responsible,
            )
            .await?;

        // Taller y siniestros sacan el vehículo de circulación
        if let Some(forced) = request.kind.forced_vehicle_status() {
            self.vehicles.set_status(&mut *tx, vehicle.id, forced).await?;
        }

        self.audit
            .record(
                &mut *tx,
                actor.user_id,
                AuditEntity::Event,
                Some(event.id),
                AuditAction::EventRecorded,
                AuditOutcome::Success,
                format!(
                    "Evento {} registrado para el vehículo {}",
                    event.kind.as_str(),
                    vehicle.plate
                ),
            )
            .await?;

        tx.commit().await?;

        Ok(ApiResponse::success_with_message(
            EventResponse::from(event),
            "Evento registrado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, filters: EventFilters) -> Result<EventListResponse, AppError> {
        let limit = filters.limit.unwrap_or(20).clamp(1, 100);
        let page = filters.page.unwrap_or(1).max(1);

        let (events, total) = self.repository.list(&filters).await?;

        Ok(EventListResponse {
            items: events.into_iter().map(EventResponse::from).collect(),
            total,
            page,
            pages: (total + limit - 1) / limit,
        })
    }
}
