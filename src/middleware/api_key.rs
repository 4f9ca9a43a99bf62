//! Middleware de API key
//!
//! Todas las rutas bajo /api exigen el header `x-api-key` con la clave
//! configurada. Es una barrera de borde previa a la autenticación JWT.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{state::AppState, utils::errors::AppError};

/// Middleware que valida el header x-api-key contra la configuración
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == state.config.api_key => Ok(next.run(request).await),
        _ => Err(AppError::Unauthorized("API key inválida".to_string())),
    }
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
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/no_existe")
            .unwrap();
        AppState::new(pool, config)
    }

    fn guarded_router(state: AppState) -> Router {
        Router::new()
            .route("/api/recurso", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(state.clone(), api_key_middleware))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_rejects_request_without_api_key() {
        let app = guarded_router(test_state());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/recurso")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejects_wrong_api_key() {
        let app = guarded_router(test_state());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/recurso")
                    .header("x-api-key", "otra-clave")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_accepts_correct_api_key() {
        let app = guarded_router(test_state());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/recurso")
                    .header("x-api-key", "clave-de-prueba")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
