//! Executor del pipeline.

use log::{debug, info, warn};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::ENGINE_VERSION;
use crate::errors::ExecutionError;
use crate::event::{DiscardEventStore, EventStore, InMemoryEventStore, RunEvent, RunEventKind};
use crate::hashing::hash_value;
use crate::ops::{self, AggregateOperation};
use crate::step::{Step, StepKind};
use crate::workflow::{definition_hash, Workflow};

/// Ejecuta `steps` sin conservar traza.
///
/// Atajo de `Executor::with_store(DiscardEventStore).execute(steps)`.
pub fn execute(steps: &[Step]) -> Result<Value, ExecutionError> {
    Executor::with_store(DiscardEventStore).execute(steps)
}

/// Motor de ejecución de pipelines.
///
/// No guarda estado entre ejecuciones salvo la traza en su `EventStore`; cada
/// llamada a `execute` recibe un `run_id` nuevo. El único estado mutable de un
/// run es el valor actual, que sólo avanza:
/// `[ausente] -> resultado del Source -> ... -> resultado final`.
#[derive(Debug)]
pub struct Executor<E: EventStore> {
    event_store: E,
    last_run_id: Option<Uuid>,
}

impl Executor<InMemoryEventStore> {
    /// Executor con traza en memoria.
    pub fn new() -> Self {
        Self::with_store(InMemoryEventStore::default())
    }
}

impl Default for Executor<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventStore> Executor<E> {
    pub fn with_store(event_store: E) -> Self {
        Self { event_store, last_run_id: None }
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run_id
    }

    pub fn events_for(&self, run_id: Uuid) -> Vec<RunEvent> {
        self.event_store.list(run_id)
    }

    /// Eventos del último run.
    pub fn events(&self) -> Option<Vec<RunEvent>> {
        self.last_run_id.map(|id| self.event_store.list(id))
    }

    /// Variante compacta de los eventos del último run.
    pub fn event_variants(&self) -> Option<Vec<&'static str>> {
        self.events().map(|events| {
                         events.iter()
                               .map(|e| match e.kind {
                                   RunEventKind::RunStarted { .. } => "I",
                                   RunEventKind::StepStarted { .. } => "S",
                                   RunEventKind::StepFinished { .. } => "F",
                                   RunEventKind::StepFailed { .. } => "X",
                                   RunEventKind::RunFailed { .. } => "E",
                                   RunEventKind::RunCompleted { .. } => "C",
                               })
                               .collect()
                     })
    }

    /// Fingerprint del último run si terminó correctamente.
    pub fn run_fingerprint(&self) -> Option<String> {
        self.events()?.iter().rev().find_map(|e| match &e.kind {
                                       RunEventKind::RunCompleted { run_fingerprint } => Some(run_fingerprint.clone()),
                                       _ => None,
                                   })
    }

    pub fn execute_workflow(&mut self, workflow: &Workflow) -> Result<Value, ExecutionError> {
        self.execute(workflow.steps())
    }

    /// Ejecuta los steps en orden y devuelve el valor final.
    ///
    /// Los placeholders se descartan antes de empezar; los índices de error se
    /// refieren a la secuencia resultante. Sin steps ejecutables devuelve
    /// `EmptyWorkflow`. La primera precondición fallida corta el run sin
    /// resultado parcial.
    pub fn execute(&mut self, steps: &[Step]) -> Result<Value, ExecutionError> {
        let run_id = Uuid::new_v4();
        self.last_run_id = Some(run_id);

        let steps: Vec<&Step> = steps.iter().filter(|s| !s.is_placeholder()).collect();
        let definition_hash = definition_hash(steps.iter().copied());
        self.event_store.append_kind(run_id,
                                     RunEventKind::RunStarted { definition_hash: definition_hash.clone(),
                                                                step_count: steps.len() });

        if steps.is_empty() {
            let error = ExecutionError::EmptyWorkflow;
            warn!("run {run_id}: {error}");
            self.event_store.append_kind(run_id, RunEventKind::RunFailed { error: error.clone() });
            return Err(error);
        }

        let mut current: Option<Value> = None;
        let mut step_fingerprints: Vec<String> = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            self.event_store.append_kind(run_id,
                                         RunEventKind::StepStarted { step_index: index,
                                                                     step_id: step.id().to_string(),
                                                                     kind: step.kind() });

            let next = match apply_step(index, step, current.as_ref()) {
                Ok(v) => v,
                Err(error) => {
                    warn!("run {run_id}: step '{}' failed: {error}", step.id());
                    self.event_store.append_kind(run_id,
                                                 RunEventKind::StepFailed { step_index: index,
                                                                            step_id: step.id().to_string(),
                                                                            error: error.clone() });
                    return Err(error);
                }
            };

            let output_hash = hash_value(&next);
            let fingerprint = step_fingerprint(&definition_hash, index, step, &output_hash);
            debug!("run {run_id}: step {index} '{}' ({}) finished", step.id(), step.kind().as_str());
            self.event_store.append_kind(run_id,
                                         RunEventKind::StepFinished { step_index: index,
                                                                      step_id: step.id().to_string(),
                                                                      output_hash,
                                                                      fingerprint: fingerprint.clone() });
            step_fingerprints.push(fingerprint);
            current = Some(next);
        }

        let run_fingerprint = hash_value(&json!({
                                             "engine_version": ENGINE_VERSION,
                                             "definition_hash": definition_hash,
                                             "step_fingerprints": step_fingerprints,
                                         }));
        info!("run {run_id} completed ({} steps)", steps.len());
        self.event_store.append_kind(run_id, RunEventKind::RunCompleted { run_fingerprint });

        // steps no vacío: cada iteración exitosa deja `current` presente
        Ok(current.unwrap_or_default())
    }
}

/// Aplica un step sobre el valor actual. Falta de datos se comprueba antes
/// que falta de configuración.
fn apply_step(index: usize, step: &Step, current: Option<&Value>) -> Result<Value, ExecutionError> {
    let data = || current.ok_or_else(|| ExecutionError::missing_data(index));
    match step.kind() {
        StepKind::Source => Ok(step.payload().cloned().unwrap_or_else(|| Value::Array(Vec::new()))),
        StepKind::Filter => {
            let data = data()?;
            let config = step.filter_config().ok_or_else(|| ExecutionError::missing_configuration(index))?;
            // un valor suelto se filtra como secuencia de un item
            let items = match data {
                Value::Array(items) => ops::filter(items, config),
                scalar => ops::filter(std::slice::from_ref(scalar), config),
            };
            Ok(Value::Array(items))
        }
        StepKind::Max => aggregate(index, step, data()?, AggregateOperation::Max),
        StepKind::Min => aggregate(index, step, data()?, AggregateOperation::Min),
        StepKind::Sum => aggregate(index, step, data()?, AggregateOperation::Sum),
        StepKind::Count => Ok(AggregateOperation::Count.apply(data()?, "")),
        // no-op: `execute` los descarta antes del loop
        StepKind::Placeholder => data().cloned(),
    }
}

fn aggregate(index: usize, step: &Step, data: &Value, op: AggregateOperation) -> Result<Value, ExecutionError> {
    let config = step.aggregate_config()
                     .ok_or_else(|| ExecutionError::missing_configuration(index))?;
    Ok(op.apply(data, &config.field))
}

fn step_fingerprint(definition_hash: &str, index: usize, step: &Step, output_hash: &str) -> String {
    hash_value(&json!({
        "engine_version": ENGINE_VERSION,
        "definition_hash": definition_hash,
        "step_index": index,
        "step_id": step.id(),
        "output_hash": output_hash,
        "params": step.config().and_then(|c| serde_json::to_value(c).ok()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::FilterConfig;

    #[test]
    fn source_without_payload_yields_empty_sequence() {
        let out = execute(&[Step::new("s", StepKind::Source)]).unwrap();
        assert_eq!(out, json!([]));
    }

    #[test]
    fn filter_on_scalar_treats_it_as_single_item() {
        let steps = [Step::source("s", json!(5)), Step::filter("f", FilterConfig::new("", "greater", 2))];
        assert_eq!(execute(&steps).unwrap(), json!([5]));
    }

    #[test]
    fn missing_data_is_reported_before_missing_configuration() {
        let err = execute(&[Step::new("m", StepKind::Max)]).unwrap_err();
        assert_eq!(err, ExecutionError::missing_data(0));
    }

    #[test]
    fn trace_records_started_finished_and_completed() {
        let mut exec = Executor::new();
        exec.execute(&[Step::source("s", json!([1, 2])), Step::count("c")]).unwrap();
        assert_eq!(exec.event_variants().unwrap(), vec!["I", "S", "F", "S", "F", "C"]);
        assert!(exec.run_fingerprint().is_some());
    }

    #[test]
    fn empty_workflow_trace_has_no_fingerprint() {
        let mut exec = Executor::new();
        let err = exec.execute(&[Step::placeholder("p0"), Step::placeholder("p1")]).unwrap_err();
        assert_eq!(err, ExecutionError::EmptyWorkflow);
        assert_eq!(exec.event_variants().unwrap(), vec!["I", "E"]);
        assert!(exec.run_fingerprint().is_none());
        let events = exec.events().unwrap();
        assert!(matches!(events[0].kind, RunEventKind::RunStarted { step_count: 0, .. }));
        assert!(matches!(&events[1].kind, RunEventKind::RunFailed { error: ExecutionError::EmptyWorkflow }));
    }

    #[test]
    fn placeholder_passes_current_value_through() {
        let step = Step::placeholder("p");
        assert_eq!(apply_step(0, &step, Some(&json!([1, 2]))).unwrap(), json!([1, 2]));
        assert_eq!(apply_step(2, &step, None).unwrap_err(), ExecutionError::missing_data(2));
    }

    #[test]
    fn count_loaded_with_saved_marker_runs() {
        let count: Step = serde_json::from_value(json!({
            "id": "count-1", "type": "count", "config": {"saved": true}
        })).unwrap();
        assert!(count.config().is_none());
        let out = execute(&[Step::source("s", json!([1, 2, 3])), count]).unwrap();
        assert_eq!(out, json!(3));
    }

    #[test]
    fn trace_stops_at_failed_step() {
        let mut exec = Executor::new();
        let err = exec.execute(&[Step::count("c"), Step::source("s", json!([1]))]).unwrap_err();
        assert_eq!(err, ExecutionError::missing_data(0));
        assert_eq!(exec.event_variants().unwrap(), vec!["I", "S", "X"]);
        assert!(exec.run_fingerprint().is_none());
    }
}
