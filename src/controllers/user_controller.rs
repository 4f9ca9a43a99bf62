//! Controller de usuarios
//!
//! Alta y mantenimiento de cuentas. Solo administración llega hasta aquí;
//! la regla de negocio es que un requester siempre cuelga de un supervisor.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserFilters, UserResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::audit::{AuditAction, AuditEntity, AuditOutcome};
use crate::models::user::UserRole;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct UserController {
    repository: UserRepository,
    audit: AuditRepository,
    pool: PgPool,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool.clone()),
            audit: AuditRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let role = request.role.unwrap_or(UserRole::Requester);

        // Un requester siempre necesita supervisor; los demás perfiles no
        // guardan ninguno
        let supervisor_id = if role == UserRole::Requester {
            let supervisor_id = request.supervisor_id.ok_or_else(|| {
                AppError::BadRequest(
                    "Un usuario con perfil requester debe tener supervisor".to_string(),
                )
            })?;

            self.repository
                .find_by_id(supervisor_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Supervisor no encontrado".to_string()))?;

            Some(supervisor_id)
        } else {
            None
        };

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(
                request.name,
                request.email,
                password_hash,
                request.phone,
                request.position,
                role,
                supervisor_id,
            )
            .await?;

        self.audit
            .record(
                &self.pool,
                actor.user_id,
                AuditEntity::User,
                Some(user.id),
                AuditAction::UserCreated,
                AuditOutcome::Success,
                format!("Usuario {} creado por {}", user.email, actor.email),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn list(&self, filters: UserFilters) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.list(&filters).await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        // Si no viene contraseña nueva se conserva el hash anterior
        let password_hash = match request.password {
            Some(password) => bcrypt::hash(&password, bcrypt::DEFAULT_COST)
                .map_err(|e| AppError::Hash(e.to_string()))?,
            None => current.password_hash.clone(),
        };

        let role = request.role.unwrap_or(current.role);
        let status = request.status.unwrap_or(current.status);

        // La regla del supervisor se evalúa sobre el perfil final
        let supervisor_id = if role == UserRole::Requester {
            let supervisor_id = request
                .supervisor_id
                .or(current.supervisor_id)
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "Un usuario con perfil requester debe tener supervisor".to_string(),
                    )
                })?;

            self.repository
                .find_by_id(supervisor_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Supervisor no encontrado".to_string()))?;

            Some(supervisor_id)
        } else {
            None
        };

        let user = self
            .repository
            .update(
                id,
                request.name.unwrap_or(current.name),
                request.email.unwrap_or(current.email),
                password_hash,
                request.phone.or(current.phone),
                request.position.or(current.position),
                role,
                status,
                supervisor_id,
            )
            .await?;

        self.audit
            .record(
                &self.pool,
                actor.user_id,
                AuditEntity::User,
                Some(user.id),
                AuditAction::UserUpdated,
                AuditOutcome::Success,
                format!("Usuario {} actualizado por {}", user.email, actor.email),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Usuario actualizado exitosamente".to_string(),
        ))
    }
}
