use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::UserFilters;
use crate::models::user::{User, UserRole, UserStatus};
use crate::utils::errors::{is_unique_violation, AppError};

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        position: Option<String>,
        role: UserRole,
        supervisor_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        let id = Uuid::new_v4();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, phone, position, role, status, supervisor_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(position)
        .bind(role)
        .bind(supervisor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Ya existe un usuario con ese email".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn list(&self, filters: &UserFilters) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::user_role IS NULL OR role = $1)
              AND ($2::user_status IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR supervisor_id = $3)
            ORDER BY name
            "#,
        )
        .bind(filters.role)
        .bind(filters.status)
        .bind(filters.supervisor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    // Persiste los valores finales ya resueltos por el controller
    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        position: Option<String>,
        role: UserRole,
        status: UserStatus,
        supervisor_id: Option<Uuid>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, phone = $5, position = $6,
                role = $7, status = $8, supervisor_id = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(position)
        .bind(role)
        .bind(status)
        .bind(supervisor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Ya existe un usuario con ese email".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(user)
    }
}
