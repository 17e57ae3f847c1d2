use pipe_core::{ConfigError, ExecutionError};
use thiserror::Error;

/// Errores de la aplicación (capa que invoca al engine).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Datos inválidos: {0}")]
    Payload(String),
    #[error("No se indicó archivo de workflow (argumento o PIPEFLOW_WORKFLOW)")]
    MissingWorkflow,
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
    #[error("Error de ejecución: {0}")]
    Execution(#[from] ExecutionError),
}

impl AppError {
    /// Código de salida del CLI: 3 para fallos de ejecución, 2 para entrada o configuración.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Execution(_) => 3,
            _ => 2,
        }
    }
}
