//! Ejecución de un workflow con traza y armado del reporte para el CLI.
use pipe_core::{ExecutionError, Executor, RunEvent, Workflow};
use serde_json::{json, Value};

/// Resultado de un run junto con su traza.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: Result<Value, ExecutionError>,
    pub run_fingerprint: Option<String>,
    pub events: Vec<RunEvent>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Vista JSON: `{ "result": ..., "fingerprint": ... }` o `{ "error": {...} }`.
    pub fn to_json(&self) -> Value {
        match &self.outcome {
            Ok(result) => json!({ "result": result, "fingerprint": self.run_fingerprint }),
            Err(error) => json!({ "error": error, "message": error.to_string() }),
        }
    }
}

pub fn run_workflow(workflow: &Workflow) -> RunReport {
    let mut executor = Executor::new();
    let outcome = executor.execute_workflow(workflow);
    RunReport { outcome,
                run_fingerprint: executor.run_fingerprint(),
                events: executor.events().unwrap_or_default() }
}
