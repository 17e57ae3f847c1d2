//! Tipos de evento de una ejecución y estructura `RunEvent`.
//!
//! Cada llamada a `Executor::execute` emite eventos append-only bajo un
//! `run_id` nuevo. La secuencia observable es:
//! `RunStarted -> (StepStarted -> StepFinished)* -> RunCompleted`, o bien se
//! corta en el primer `StepFailed` / `RunFailed`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ExecutionError;
use crate::step::StepKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Primer evento de un run. `step_count` excluye placeholders.
    RunStarted { definition_hash: String, step_count: usize },
    StepStarted { step_index: usize, step_id: String, kind: StepKind },
    /// El step produjo un nuevo valor actual.
    StepFinished {
        step_index: usize,
        step_id: String,
        output_hash: String,
        fingerprint: String,
    },
    /// Precondición fallida: el run no continúa.
    StepFailed {
        step_index: usize,
        step_id: String,
        error: ExecutionError,
    },
    /// Fallo antes de ejecutar cualquier step (workflow vacío).
    RunFailed { error: ExecutionError },
    /// Cierre con fingerprint agregado (hash de los fingerprints de steps en orden).
    RunCompleted { run_fingerprint: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // orden de append dentro del run
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
