//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula las consultas SQL de una tabla. Las
//! escrituras que participan en transacciones de coordinadores reciben
//! el executor como parámetro.

pub mod user_repository;
pub mod vehicle_repository;
pub mod reservation_repository;
pub mod allocation_repository;
pub mod return_repository;
pub mod event_repository;
pub mod audit_repository;
