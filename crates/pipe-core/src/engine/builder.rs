//! Builder para `Workflow`.
//!
//! Encadena steps en el orden de llamada y les asigna ids `"<tipo>-<n>"`
//! (con `n` creciente por builder), de modo que un workflow construido sólo
//! con estos métodos nunca repite ids.
//!
//! ```
//! use pipe_core::{execute, Workflow};
//! use serde_json::json;
//!
//! let wf = Workflow::builder()
//!     .source(json!([1, 2, 3, 4]))
//!     .filter("", "greater", 2)
//!     .sum("")
//!     .build()
//!     .unwrap();
//! assert_eq!(execute(wf.steps()).unwrap(), json!(7));
//! ```

use serde_json::Value;

use crate::errors::ConfigError;
use crate::step::{FilterConfig, FilterLiteral, FilterOperator, Step, StepKind};
use crate::workflow::Workflow;

#[derive(Debug, Default)]
pub struct WorkflowBuilder {
    name: Option<String>,
    steps: Vec<Step>,
    counter: usize,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn source(mut self, payload: Value) -> Self {
        let id = self.next_id(StepKind::Source);
        self.step(Step::source(id, payload))
    }

    pub fn filter(mut self,
                  field: impl Into<String>,
                  operator: impl Into<FilterOperator>,
                  value: impl Into<FilterLiteral>)
                  -> Self {
        let id = self.next_id(StepKind::Filter);
        self.step(Step::filter(id, FilterConfig::new(field, operator, value)))
    }

    pub fn max(mut self, field: impl Into<String>) -> Self {
        let id = self.next_id(StepKind::Max);
        self.step(Step::max(id, field))
    }

    pub fn min(mut self, field: impl Into<String>) -> Self {
        let id = self.next_id(StepKind::Min);
        self.step(Step::min(id, field))
    }

    pub fn sum(mut self, field: impl Into<String>) -> Self {
        let id = self.next_id(StepKind::Sum);
        self.step(Step::sum(id, field))
    }

    pub fn count(mut self) -> Self {
        let id = self.next_id(StepKind::Count);
        self.step(Step::count(id))
    }

    /// Hueco vacío del editor; el executor lo ignora.
    pub fn placeholder(mut self) -> Self {
        let id = self.next_id(StepKind::Placeholder);
        self.step(Step::placeholder(id))
    }

    /// Añade un step ya construido (su id no se reescribe).
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Steps sin validar, en orden.
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Falla sólo si un step añadido con `step` repite un id.
    pub fn build(self) -> Result<Workflow, ConfigError> {
        let wf = Workflow::new(self.steps)?;
        Ok(match self.name {
            Some(name) => wf.with_name(name),
            None => wf,
        })
    }

    fn next_id(&mut self, kind: StepKind) -> String {
        self.counter += 1;
        format!("{}-{}", kind.as_str(), self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assigns_sequential_ids_in_call_order() {
        let steps = WorkflowBuilder::new().source(json!([1])).placeholder().count().into_steps();
        let ids: Vec<&str> = steps.iter().map(Step::id).collect();
        assert_eq!(ids, vec!["source-1", "empty-2", "count-3"]);
    }

    #[test]
    fn build_rejects_duplicate_manual_ids() {
        let res = WorkflowBuilder::new().step(Step::count("x")).step(Step::count("x")).build();
        assert_eq!(res.unwrap_err(), ConfigError::DuplicateStepId("x".into()));
    }

    #[test]
    fn build_keeps_name() {
        let wf = WorkflowBuilder::new().named("demo").count().build().unwrap();
        assert_eq!(wf.name(), Some("demo"));
    }
}
