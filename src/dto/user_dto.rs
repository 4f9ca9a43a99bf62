use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{User, UserRole, UserStatus};

// Request para crear un usuario (sólo administradores)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub position: Option<String>,

    pub role: Option<UserRole>,

    // Obligatorio cuando el perfil es requester
    pub supervisor_id: Option<Uuid>,
}

// Request para actualizar un usuario existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,

    #[validate(length(min = 8, max = 20))]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub position: Option<String>,

    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub supervisor_id: Option<Uuid>,
}

// Filtros para búsqueda de usuarios
#[derive(Debug, Deserialize)]
pub struct UserFilters {
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub supervisor_id: Option<Uuid>,
}

// Response de usuario (nunca expone el hash de la contraseña)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub supervisor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            position: user.position,
            role: user.role,
            status: user.status,
            supervisor_id: user.supervisor_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
