//! Rutas HTTP de la API, un router por recurso

pub mod allocation_routes;
pub mod auth_routes;
pub mod event_routes;
pub mod report_routes;
pub mod reservation_routes;
pub mod return_routes;
pub mod user_routes;
pub mod vehicle_routes;
