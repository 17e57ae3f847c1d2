//! Configuración específica por tipo de step.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::model::{number_value, parse_numeric_literal, to_text};

/// Operador de comparación de un filtro.
///
/// Se (de)serializa como string. Nombres aceptados (sin distinguir mayúsculas):
/// `greater`/`greaterThan`/`gt`/`>`, `less`/`lessThan`/`lt`/`<`,
/// `equal`/`eq`/`==`, `notEqual`/`ne`/`!=`. Cualquier otro nombre se conserva
/// como `Unrecognized` y el filtro deja pasar todos los items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    GreaterThan,
    LessThan,
    /// Igualdad laxa: numérica si el literal es numérico, textual si no.
    Equal,
    NotEqual,
    Unrecognized(String),
}

impl From<&str> for FilterOperator {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "greater" | "greaterthan" | "greater_than" | "gt" | ">" => FilterOperator::GreaterThan,
            "less" | "lessthan" | "less_than" | "lt" | "<" => FilterOperator::LessThan,
            "equal" | "equals" | "eq" | "==" => FilterOperator::Equal,
            "notequal" | "not_equal" | "ne" | "!=" => FilterOperator::NotEqual,
            _ => FilterOperator::Unrecognized(name.to_string()),
        }
    }
}

impl From<String> for FilterOperator {
    fn from(name: String) -> Self {
        FilterOperator::from(name.as_str())
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        match op {
            FilterOperator::GreaterThan => "greater".into(),
            FilterOperator::LessThan => "less".into(),
            FilterOperator::Equal => "equal".into(),
            FilterOperator::NotEqual => "notEqual".into(),
            FilterOperator::Unrecognized(name) => name,
        }
    }
}

/// Literal contra el que compara un filtro: número o string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterLiteral {
    Number(f64),
    Text(String),
}

impl FilterLiteral {
    /// Valor numérico si el literal es (o se lee como) un número.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            FilterLiteral::Number(n) => Some(*n).filter(|f| f.is_finite()),
            FilterLiteral::Text(s) => parse_numeric_literal(s),
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        match self {
            FilterLiteral::Number(n) => {
                Cow::Owned(to_text(&number_value(*n)).map(Cow::into_owned).unwrap_or_else(|| n.to_string()))
            }
            FilterLiteral::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }
}

impl From<f64> for FilterLiteral {
    fn from(n: f64) -> Self {
        FilterLiteral::Number(n)
    }
}

impl From<i64> for FilterLiteral {
    fn from(n: i64) -> Self {
        FilterLiteral::Number(n as f64)
    }
}

impl From<i32> for FilterLiteral {
    fn from(n: i32) -> Self {
        FilterLiteral::Number(f64::from(n))
    }
}

impl From<&str> for FilterLiteral {
    fn from(s: &str) -> Self {
        FilterLiteral::Text(s.to_string())
    }
}

impl From<String> for FilterLiteral {
    fn from(s: String) -> Self {
        FilterLiteral::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Campo a leer en records. Se ignora cuando los items son escalares.
    #[serde(default)]
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterLiteral,
}

impl FilterConfig {
    pub fn new(field: impl Into<String>, operator: impl Into<FilterOperator>, value: impl Into<FilterLiteral>) -> Self {
        Self { field: field.into(),
               operator: operator.into(),
               value: value.into() }
    }
}

/// Config de Max/Min/Sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateConfig {
    #[serde(default)]
    pub field: String,
}

impl AggregateConfig {
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

/// Unión etiquetada de configuraciones. El variant válido depende del
/// `StepKind` (ver `StepKind::accepts`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepConfig {
    Filter(FilterConfig),
    Aggregate(AggregateConfig),
}

impl StepConfig {
    pub fn variant_name(&self) -> &'static str {
        match self {
            StepConfig::Filter(_) => "filter",
            StepConfig::Aggregate(_) => "aggregate",
        }
    }
}

impl From<FilterConfig> for StepConfig {
    fn from(c: FilterConfig) -> Self {
        StepConfig::Filter(c)
    }
}

impl From<AggregateConfig> for StepConfig {
    fn from(c: AggregateConfig) -> Self {
        StepConfig::Aggregate(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operator_names_and_aliases() {
        assert_eq!(FilterOperator::from("greater"), FilterOperator::GreaterThan);
        assert_eq!(FilterOperator::from("GreaterThan"), FilterOperator::GreaterThan);
        assert_eq!(FilterOperator::from("<"), FilterOperator::LessThan);
        assert_eq!(FilterOperator::from("notEqual"), FilterOperator::NotEqual);
        assert_eq!(FilterOperator::from("between"), FilterOperator::Unrecognized("between".into()));
    }

    #[test]
    fn filter_config_deserializes_number_or_text_literal() {
        let c: FilterConfig = serde_json::from_value(json!({"field": "v", "operator": "greater", "value": 2})).unwrap();
        assert_eq!(c.value.numeric(), Some(2.0));
        let c: FilterConfig = serde_json::from_value(json!({"field": "v", "operator": "equal", "value": "2"})).unwrap();
        assert_eq!(c.value, FilterLiteral::Text("2".into()));
        assert_eq!(c.value.numeric(), Some(2.0));
        let c: FilterConfig = serde_json::from_value(json!({"field": "name", "operator": "equal", "value": "ana"})).unwrap();
        assert_eq!(c.value.numeric(), None);
    }

    #[test]
    fn unrecognized_operator_roundtrips_verbatim() {
        let c = FilterConfig::new("v", "between", 1);
        let v = serde_json::to_value(&c).unwrap();
        assert_eq!(v["operator"], json!("between"));
    }

    #[test]
    fn numeric_literal_text_form() {
        assert_eq!(FilterLiteral::Number(2.0).text(), "2");
        assert_eq!(FilterLiteral::Number(2.5).text(), "2.5");
    }
}
