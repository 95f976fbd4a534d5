//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del cliente resuelta desde el entorno.

pub mod environment;

pub use environment::*;
