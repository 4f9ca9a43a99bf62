//! Middleware de autenticación JWT
//!
//! Este módulo valida el token de sesión, verifica que la cuenta siga
//! activa y deja el usuario autenticado disponible en las extensions.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::user::{UserRole, UserStatus},
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub email: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let jwt_config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &jwt_config)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    // Verificar que el usuario sigue existiendo y activo
    let repository = UserRepository::new(state.pool.clone());
    let user = repository
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if user.status != UserStatus::Active {
        return Err(AppError::Unauthorized("Usuario inactivo o bloqueado".to_string()));
    }

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        role: user.role,
        email: user.email,
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::EnvironmentConfig;

    fn test_state() -> AppState {
        let config = EnvironmentConfig {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            jwt_secret: "secreto-de-prueba".to_string(),
            jwt_expiration: 3600,
            api_key: "clave-de-prueba".to_string(),
            cors_origins: vec!["*".to_string()],
        };
        // Pool perezoso: los casos de rechazo nunca llegan a la base
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/no_existe")
            .unwrap();
        AppState::new(pool, config)
    }

    fn protected_router(state: AppState) -> Router {
        Router::new()
            .route("/protegido", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_rejects_request_without_token() {
        let app = protected_router(test_state());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protegido")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejects_non_bearer_scheme() {
        let app = protected_router(test_state());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protegido")
                    .header(header::AUTHORIZATION, "Basic abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejects_invalid_token() {
        let app = protected_router(test_state());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protegido")
                    .header(header::AUTHORIZATION, "Bearer token-falso")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
