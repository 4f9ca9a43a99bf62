//! Controller de autenticación
//!
//! Login contra la tabla de usuarios y emisión del JWT de sesión.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::user_dto::UserResponse;
use crate::models::user::UserStatus;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            config,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        // Credenciales inválidas y usuario inexistente responden igual
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let password_ok = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if !password_ok {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        if user.status != UserStatus::Active {
            return Err(AppError::Unauthorized("Usuario inactivo o bloqueado".to_string()));
        }

        let jwt_config = JwtConfig::from(&self.config);
        let token = generate_token(user.id, user.role, &user.email, &jwt_config)?;

        log::info!("🔓 Login exitoso de {}", user.email);

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_expiration,
            user: UserResponse::from(user),
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UserResponse::from(user))
    }
}
