//! Errores del core.
//!
//! Dos familias:
//! - `ExecutionError`: resultado terminal de una ejecución fallida. Es el único
//!   error que `execute` devuelve al llamador.
//! - `ConfigError`: rechazo al construir steps/workflows (config del tipo
//!   equivocado, payload en un step que no es fuente, ids repetidos).
//!
//! Los fallos de coerción dentro de filter/aggregate NO son errores: degradan
//! de forma permisiva (ver `ops`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::StepKind;

/// Motivo por el que un step no pudo ejecutarse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepErrorReason {
    /// No hay valor actual (ningún Source se ejecutó antes).
    MissingData,
    /// El step requiere configuración y no la tiene.
    MissingConfiguration,
}

impl std::fmt::Display for StepErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepErrorReason::MissingData => f.write_str("missing data"),
            StepErrorReason::MissingConfiguration => f.write_str("missing configuration"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ExecutionError {
    #[error("no executable steps in workflow")] EmptyWorkflow,
    /// `index` es la posición dentro de la secuencia ya filtrada (sin placeholders).
    #[error("step {index}: {reason}")] StepError { index: usize, reason: StepErrorReason },
}

impl ExecutionError {
    pub fn missing_data(index: usize) -> Self {
        ExecutionError::StepError { index, reason: StepErrorReason::MissingData }
    }

    pub fn missing_configuration(index: usize) -> Self {
        ExecutionError::StepError { index, reason: StepErrorReason::MissingConfiguration }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("step '{step_id}': {kind:?} does not accept {found} configuration")]
    ConfigKindMismatch { step_id: String, kind: StepKind, found: String },
    #[error("step '{step_id}': payload is only allowed on source steps (found {kind:?})")]
    PayloadOnNonSource { step_id: String, kind: StepKind },
    #[error("step '{step_id}': invalid configuration: {message}")]
    InvalidConfig { step_id: String, message: String },
    #[error("duplicate step id '{0}'")] DuplicateStepId(String),
    #[error("step not found: {0}")] StepNotFound(String),
}
