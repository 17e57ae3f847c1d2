use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::config::{AggregateConfig, FilterConfig, StepConfig};
use crate::errors::ConfigError;

/// Tipo de step. `Placeholder` es el hueco vacío que deja el editor: el
/// executor lo descarta antes de ejecutar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    #[serde(alias = "data")]
    Source,
    Filter,
    Max,
    Min,
    Count,
    Sum,
    #[serde(rename = "empty", alias = "placeholder")]
    Placeholder,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Source => "source",
            StepKind::Filter => "filter",
            StepKind::Max => "max",
            StepKind::Min => "min",
            StepKind::Count => "count",
            StepKind::Sum => "sum",
            StepKind::Placeholder => "empty",
        }
    }

    /// Etiqueta por defecto (la de la paleta del editor).
    pub fn default_label(self) -> &'static str {
        match self {
            StepKind::Source => "Add Data",
            StepKind::Filter => "Filter",
            StepKind::Max => "Maximum",
            StepKind::Min => "Minimum",
            StepKind::Count => "Count",
            StepKind::Sum => "Sum",
            StepKind::Placeholder => "Empty",
        }
    }

    pub fn is_placeholder(self) -> bool {
        matches!(self, StepKind::Placeholder)
    }

    /// ¿Acepta este tipo de step la configuración dada?
    pub fn accepts(self, config: &StepConfig) -> bool {
        matches!((self, config),
                 (StepKind::Filter, StepConfig::Filter(_))
                 | (StepKind::Max | StepKind::Min | StepKind::Sum, StepConfig::Aggregate(_)))
    }
}

/// Unidad inmutable del workflow.
///
/// Se construye con los helpers (`Step::source`, `Step::filter`, ...) o
/// deserializando JSON; en ambos casos se valida que la configuración
/// corresponda al tipo y que sólo los `Source` lleven payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStep", into = "RawStep")]
pub struct Step {
    id: String,
    kind: StepKind,
    label: String,
    config: Option<StepConfig>,
    payload: Option<Value>,
}

impl Step {
    /// Step sin configuración ni payload.
    pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
        Self { id: id.into(),
               kind,
               label: kind.default_label().to_string(),
               config: None,
               payload: None }
    }

    pub fn source(id: impl Into<String>, payload: Value) -> Self {
        Self { payload: Some(payload),
               ..Self::new(id, StepKind::Source) }
    }

    pub fn filter(id: impl Into<String>, config: FilterConfig) -> Self {
        Self { config: Some(StepConfig::Filter(config)),
               ..Self::new(id, StepKind::Filter) }
    }

    pub fn max(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::aggregate(id, StepKind::Max, field)
    }

    pub fn min(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::aggregate(id, StepKind::Min, field)
    }

    pub fn sum(id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::aggregate(id, StepKind::Sum, field)
    }

    pub fn count(id: impl Into<String>) -> Self {
        Self::new(id, StepKind::Count)
    }

    pub fn placeholder(id: impl Into<String>) -> Self {
        Self::new(id, StepKind::Placeholder)
    }

    fn aggregate(id: impl Into<String>, kind: StepKind, field: impl Into<String>) -> Self {
        Self { config: Some(StepConfig::Aggregate(AggregateConfig::new(field))),
               ..Self::new(id, kind) }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Fija la configuración, rechazando variantes que no corresponden al tipo.
    pub fn with_config(mut self, config: impl Into<StepConfig>) -> Result<Self, ConfigError> {
        let config = config.into();
        if !self.kind.accepts(&config) {
            return Err(ConfigError::ConfigKindMismatch { step_id: self.id,
                                                         kind: self.kind,
                                                         found: config.variant_name().to_string() });
        }
        self.config = Some(config);
        Ok(self)
    }

    /// Adjunta el payload. Sólo válido en steps `Source`.
    pub fn with_payload(mut self, payload: Value) -> Result<Self, ConfigError> {
        if self.kind != StepKind::Source {
            return Err(ConfigError::PayloadOnNonSource { step_id: self.id, kind: self.kind });
        }
        self.payload = Some(payload);
        Ok(self)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Sólo para presentación; el motor no la usa.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn config(&self) -> Option<&StepConfig> {
        self.config.as_ref()
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind.is_placeholder()
    }

    pub fn filter_config(&self) -> Option<&FilterConfig> {
        match &self.config {
            Some(StepConfig::Filter(c)) => Some(c),
            _ => None,
        }
    }

    pub fn aggregate_config(&self) -> Option<&AggregateConfig> {
        match &self.config {
            Some(StepConfig::Aggregate(c)) => Some(c),
            _ => None,
        }
    }
}

/// Forma serializada de un step (formato del editor):
/// `{ "id", "type", "label"?, "config"?, "data"? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawStep {
    id: String,
    #[serde(rename = "type", alias = "kind")]
    kind: StepKind,
    #[serde(default)]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<Value>,
    // `"data": null` es un payload presente (null), distinto de no tener `data`
    #[serde(default,
            alias = "payload",
            deserialize_with = "present_value",
            skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl TryFrom<RawStep> for Step {
    type Error = ConfigError;

    fn try_from(raw: RawStep) -> Result<Self, Self::Error> {
        let mut step = Step::new(raw.id, raw.kind);
        if let Some(label) = raw.label {
            step.label = label;
        }

        // Source/Count/Placeholder no tienen configuración propia; el editor
        // guarda marcadores como `{ "saved": true }` que aquí se descartan.
        let config = match (raw.kind, raw.config) {
            (_, None) | (_, Some(Value::Null)) => None,
            (StepKind::Filter, Some(v)) => Some(StepConfig::Filter(parse_config(&step.id, v)?)),
            (StepKind::Max | StepKind::Min | StepKind::Sum, Some(v)) => {
                Some(StepConfig::Aggregate(parse_config(&step.id, v)?))
            }
            (StepKind::Source | StepKind::Count | StepKind::Placeholder, Some(_)) => None,
        };
        if let Some(config) = config {
            step = step.with_config(config)?;
        }

        match raw.data {
            Some(payload) if !raw.kind.is_placeholder() => step.with_payload(payload),
            _ => Ok(step),
        }
    }
}

impl From<Step> for RawStep {
    fn from(step: Step) -> Self {
        RawStep { id: step.id,
                  kind: step.kind,
                  label: Some(step.label),
                  config: step.config.and_then(|c| serde_json::to_value(c).ok()),
                  data: step.payload }
    }
}

fn parse_config<T: serde::de::DeserializeOwned>(step_id: &str, value: Value) -> Result<T, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::InvalidConfig { step_id: step_id.to_string(),
                                                                          message: e.to_string() })
}
