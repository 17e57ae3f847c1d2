//! PipeFlow Rust Library
//!
//! Capa que invoca al engine (`pipe-core`):
//! - `config`: configuración desde entorno/.env.
//! - `input`: parseo del texto de datos de un step Source.
//! - `loader`: carga de workflows JSON y adjunto de payloads.
//! - `runner`: ejecución con traza y reporte.
//! - `commands`: subcomandos del CLI.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod commands;
pub mod config;
pub mod errors;
pub mod input;
pub mod loader;
pub mod runner;

pub use errors::AppError;
