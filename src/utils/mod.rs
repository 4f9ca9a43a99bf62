//! Utilidades del sistema
//! 
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y otras funcionalidades comunes.

pub mod errors;
pub mod validation;
pub mod jwt;
