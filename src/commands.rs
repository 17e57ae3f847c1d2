//! Subcomandos del CLI, separados de `main.rs` para poder probarlos con
//! writers en memoria.
use std::io::Write;
use std::path::PathBuf;

use log::info;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::input::parse_payload;
use crate::loader::{attach_payload, load_workflow};
use crate::runner::run_workflow;

/// Argumentos de `pipeflow run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub workflow: Option<PathBuf>,
    pub data: Option<String>,
    pub data_step: Option<String>,
    pub trace: bool,
}

/// Ejecuta un workflow. El reporte JSON va a `out` y la traza (si se pidió)
/// a `trace_out`. Devuelve el código de salida: 0 si el run terminó, 3 si
/// falló la ejecución.
pub fn run_command(options: RunOptions,
                   config: &AppConfig,
                   out: &mut impl Write,
                   trace_out: &mut impl Write)
                   -> Result<i32, AppError> {
    let path = options.workflow
                      .or_else(|| config.default_workflow.clone())
                      .ok_or(AppError::MissingWorkflow)?;
    let mut wf = load_workflow(&path)?;
    if let Some(text) = options.data {
        wf = attach_payload(&wf, options.data_step.as_deref(), parse_payload(&text)?)?;
    }

    let report = run_workflow(&wf);
    if options.trace || config.trace {
        for event in &report.events {
            writeln!(trace_out, "{}", serde_json::to_string(event)?)?;
        }
    }
    writeln!(out, "{}", serde_json::to_string_pretty(&report.to_json())?)?;

    match &report.outcome {
        Ok(_) => {
            info!("workflow {} ejecutado", path.display());
            Ok(0)
        }
        Err(e) => Ok(AppError::Execution(e.clone()).exit_code()),
    }
}

/// Muestra cómo se interpreta un texto de datos.
pub fn parse_data_command(text: &str, out: &mut impl Write) -> Result<i32, AppError> {
    let payload = parse_payload(text)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    Ok(0)
}
