//! Modelo de User
//!
//! Este módulo contiene el struct User, sus perfiles y estados de cuenta.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Perfil del usuario - mapea al ENUM user_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Requester,
    Supervisor,
    FleetManager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Requester => "requester",
            UserRole::Supervisor => "supervisor",
            UserRole::FleetManager => "fleet_manager",
            UserRole::Admin => "admin",
        }
    }

    /// Perfiles con atribuciones de gestión sobre reservas ajenas
    pub fn is_elevated(&self) -> bool {
        matches!(self, UserRole::Supervisor | UserRole::FleetManager | UserRole::Admin)
    }
}

/// Estado de la cuenta - mapea al ENUM user_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "user_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Blocked,
}

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub supervisor_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevated_roles() {
        assert!(!UserRole::Requester.is_elevated());
        assert!(UserRole::Supervisor.is_elevated());
        assert!(UserRole::FleetManager.is_elevated());
        assert!(UserRole::Admin.is_elevated());
    }
}
