use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::utils::errors::AppError;

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Asiento de auditoría dentro de la transacción de la operación:
    // si la operación no confirma, el asiento tampoco
    pub async fn record(
        &self,
        db: impl PgExecutor<'_>,
        actor_id: Uuid,
        entity_kind: AuditEntity,
        entity_id: Option<Uuid>,
        action: AuditAction,
        outcome: AuditOutcome,
        detail: String,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audit_records (id, actor_id, entity_kind, entity_id, action, outcome, detail)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(actor_id)
        .bind(entity_kind)
        .bind(entity_id)
        .bind(action)
        .bind(outcome)
        .bind(detail)
        .execute(db)
        .await?;

        Ok(())
    }

    // Asiento de falla fuera de transacción, de mejor esfuerzo: nunca
    // enmascara el error original de la operación
    pub async fn record_failure(
        &self,
        actor_id: Uuid,
        entity_kind: AuditEntity,
        entity_id: Option<Uuid>,
        action: AuditAction,
        detail: String,
    ) {
        let result = self
            .record(
                &self.pool,
                actor_id,
                entity_kind,
                entity_id,
                action,
                AuditOutcome::Failure,
                detail,
            )
            .await;

        if let Err(e) = result {
            log::warn!("⚠️ No se pudo registrar la auditoría de falla de {}: {}", action.as_str(), e);
        }
    }
}
