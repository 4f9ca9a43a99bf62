mod config;
mod state;
mod services;
mod utils;
mod models;
mod middleware;
mod controllers;
mod repositories;
mod routes;
mod dto;

use anyhow::Result;
use axum::{middleware::from_fn_with_state, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

use config::database::{run_migrations, DatabaseConfig};
use config::environment::EnvironmentConfig;
use middleware::api_key::api_key_middleware;
use middleware::auth::auth_middleware;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Fleet Management API - Gestión de Flota Vehicular");
    info!("====================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match DatabaseConfig::default().create_pool().await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }
    info!("📦 Migraciones aplicadas");

    // CORS permisivo solo en desarrollo
    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone());

    // Recursos protegidos: requieren JWT además de la API key
    let protected = Router::new()
        .nest("/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/users", routes::user_routes::create_user_router())
        .nest(
            "/reservations",
            routes::reservation_routes::create_reservation_router(),
        )
        .nest("/returns", routes::return_routes::create_return_router())
        .nest(
            "/allocations",
            routes::allocation_routes::create_allocation_router(),
        )
        .nest("/events", routes::event_routes::create_event_router())
        .nest("/reports", routes::report_routes::create_report_router())
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    // Toda la API va detrás de la API key; /auth/login queda sin JWT
    let api = Router::new()
        .nest(
            "/auth",
            routes::auth_routes::create_auth_router(app_state.clone()),
        )
        .merge(protected)
        .route_layer(from_fn_with_state(app_state.clone(), api_key_middleware));

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/v1/auth/login - Login");
    info!("   GET  /api/v1/auth/me - Usuario actual");
    info!("🚗 Vehículos:");
    info!("   POST /api/v1/vehicles - Crear vehículo");
    info!("   GET  /api/v1/vehicles - Listar vehículos");
    info!("   GET  /api/v1/vehicles/:id - Obtener vehículo con documentos");
    info!("   PUT  /api/v1/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/v1/vehicles/:id - Retirar vehículo");
    info!("   GET  /api/v1/vehicles/:id/availability - Consultar disponibilidad");
    info!("   POST /api/v1/vehicles/:id/documents - Adjuntar documento");
    info!("👥 Usuarios:");
    info!("   POST /api/v1/users - Crear usuario");
    info!("   GET  /api/v1/users - Listar usuarios");
    info!("   GET  /api/v1/users/:id - Obtener usuario");
    info!("   PUT  /api/v1/users/:id - Actualizar usuario");
    info!("📋 Reservas:");
    info!("   POST /api/v1/reservations - Crear reserva");
    info!("   GET  /api/v1/reservations - Listar reservas");
    info!("   POST /api/v1/reservations/:id/approve - Aprobar reserva");
    info!("   POST /api/v1/reservations/:id/reject - Rechazar reserva");
    info!("   POST /api/v1/reservations/:id/start - Iniciar uso");
    info!("   POST /api/v1/reservations/:id/cancel - Cancelar reserva");
    info!("🔑 Devoluciones:");
    info!("   POST /api/v1/returns - Registrar devolución");
    info!("🚙 Asignaciones:");
    info!("   POST /api/v1/allocations - Crear asignación");
    info!("   GET  /api/v1/allocations - Listar asignaciones");
    info!("   PUT  /api/v1/allocations/:id - Actualizar asignación");
    info!("   POST /api/v1/allocations/:id/end - Finalizar asignación");
    info!("🔧 Eventos:");
    info!("   POST /api/v1/events - Registrar evento");
    info!("   GET  /api/v1/events - Listar eventos");
    info!("📊 Reportes:");
    info!("   GET  /api/v1/reports/summary - Resumen general");
    info!("   GET  /api/v1/reports/utilization - Utilización mensual");
    info!("   GET  /api/v1/reports/costs - Costos por vehículo");
    info!("   GET  /api/v1/reports/costs-by-kind - Costos por tipo");
    info!("   GET  /api/v1/reports/sla - SLA de aprobación");
    info!("   GET  /api/v1/reports/reservations-status - Reservas por estado");
    info!("   GET  /api/v1/reports/vehicles-status - Vehículos por estado");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Liveness de la API, público y sin API key
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-management-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
