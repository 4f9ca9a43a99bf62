//! Services module
//!
//! Este módulo contiene la lógica de negocio transversal de la aplicación.

pub mod access_gate;

pub use access_gate::*;
