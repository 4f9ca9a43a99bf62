//! Middleware del sistema
//!
//! Este módulo contiene el middleware para autenticación, API key y CORS.

pub mod api_key;
pub mod auth;
pub mod cors;

pub use api_key::*;
pub use auth::*;
pub use cors::*;
