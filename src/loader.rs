//! Carga de workflows desde archivos JSON (formato del editor).
use std::fs;
use std::path::Path;

use log::debug;
use pipe_core::{ConfigError, Workflow};
use serde_json::Value;

use crate::errors::AppError;

pub fn load_workflow(path: &Path) -> Result<Workflow, AppError> {
    let text = fs::read_to_string(path)?;
    let wf = Workflow::from_json(&text)?;
    debug!("workflow cargado desde {} ({} steps ejecutables)", path.display(), wf.len());
    Ok(wf)
}

/// Devuelve un workflow con `payload` adjunto al step `step_id`, o al primer
/// Source si no se indica ninguno.
pub fn attach_payload(workflow: &Workflow, step_id: Option<&str>, payload: Value) -> Result<Workflow, AppError> {
    let target = match step_id {
        Some(id) => id,
        None => workflow.first_source_id()
                        .ok_or_else(|| ConfigError::StepNotFound("<source>".to_string()))?,
    };
    Ok(workflow.with_payload(target, payload)?)
}
