//! Modelos del sistema
//! 
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod user;
pub mod vehicle;
pub mod reservation;
pub mod allocation;
pub mod vehicle_return;
pub mod event;
pub mod audit;
