//! `Workflow`: secuencia ordenada de steps tal como la entrega el editor.
//!
//! A diferencia de un `&[Step]` suelto, un `Workflow` garantiza ids únicos
//! entre los steps ejecutables (los placeholders pueden repetirse). El orden
//! es el del llamador y nunca se altera.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::WorkflowBuilder;
use crate::errors::ConfigError;
use crate::hashing::hash_value;
use crate::step::{Step, StepKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWorkflow")]
pub struct Workflow {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    steps: Vec<Step>,
}

#[derive(Deserialize)]
struct RawWorkflow {
    #[serde(default)]
    name: Option<String>,
    steps: Vec<Step>,
}

impl TryFrom<RawWorkflow> for Workflow {
    type Error = ConfigError;

    fn try_from(raw: RawWorkflow) -> Result<Self, Self::Error> {
        let wf = Workflow::new(raw.steps)?;
        Ok(match raw.name {
            Some(name) => wf.with_name(name),
            None => wf,
        })
    }
}

impl Workflow {
    pub fn new(steps: Vec<Step>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for step in steps.iter().filter(|s| !s.is_placeholder()) {
            if !seen.insert(step.id()) {
                return Err(ConfigError::DuplicateStepId(step.id().to_string()));
            }
        }
        Ok(Self { name: None, steps })
    }

    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Todos los steps, placeholders incluidos.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Steps que el executor realmente ejecuta.
    pub fn executable_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| !s.is_placeholder())
    }

    /// Cantidad de steps ejecutables.
    pub fn len(&self) -> usize {
        self.executable_steps().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_step(&self, step_id: &str) -> Option<&Step> {
        self.executable_steps().find(|s| s.id() == step_id)
    }

    pub fn first_source_id(&self) -> Option<&str> {
        self.executable_steps().find(|s| s.kind() == StepKind::Source).map(Step::id)
    }

    pub fn definition_hash(&self) -> String {
        definition_hash(self.executable_steps())
    }

    /// Nuevo workflow con `payload` adjunto al step `step_id` (que debe ser Source).
    pub fn with_payload(&self, step_id: &str, payload: Value) -> Result<Self, ConfigError> {
        let index = self.steps
                        .iter()
                        .position(|s| !s.is_placeholder() && s.id() == step_id)
                        .ok_or_else(|| ConfigError::StepNotFound(step_id.to_string()))?;
        let mut steps = self.steps.clone();
        steps[index] = steps[index].clone().with_payload(payload)?;
        Ok(Self { name: self.name.clone(), steps })
    }
}

/// Hash de la definición: JSON canónico de los steps ejecutables en orden.
pub fn definition_hash<'a>(steps: impl IntoIterator<Item = &'a Step>) -> String {
    let steps: Vec<Value> = steps.into_iter()
                                 .map(|s| serde_json::to_value(s).unwrap_or(Value::Null))
                                 .collect();
    hash_value(&Value::Array(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn duplicate_ids_rejected_but_placeholders_may_repeat() {
        let err = Workflow::new(vec![Step::count("a"), Step::count("a")]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateStepId("a".into()));
        assert!(Workflow::new(vec![Step::placeholder("empty"), Step::placeholder("empty")]).is_ok());
    }

    #[test]
    fn placeholders_do_not_change_definition_hash() {
        let a = Workflow::new(vec![Step::source("s", json!([1])), Step::count("c")]).unwrap();
        let b = Workflow::new(vec![Step::placeholder("e1"),
                                   Step::source("s", json!([1])),
                                   Step::placeholder("e2"),
                                   Step::count("c")]).unwrap();
        assert_eq!(a.definition_hash(), b.definition_hash());
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn with_payload_targets_source_steps_only() {
        let wf = Workflow::new(vec![Step::new("s", StepKind::Source), Step::count("c")]).unwrap();
        let wf2 = wf.with_payload("s", json!([1, 2])).unwrap();
        assert_eq!(wf2.get_step("s").and_then(Step::payload), Some(&json!([1, 2])));
        assert!(wf.get_step("s").and_then(Step::payload).is_none());
        assert!(matches!(wf.with_payload("c", json!([1])), Err(ConfigError::PayloadOnNonSource { .. })));
        assert_eq!(wf.with_payload("nope", json!([1])), Err(ConfigError::StepNotFound("nope".into())));
    }
}
