//! Controllers de la aplicación
//!
//! Cada controller encapsula las operaciones de un recurso: valida la
//! entrada, coordina repositorios y arma la respuesta.

pub mod allocation_controller;
pub mod auth_controller;
pub mod event_controller;
pub mod report_controller;
pub mod reservation_controller;
pub mod return_controller;
pub mod user_controller;
pub mod vehicle_controller;
