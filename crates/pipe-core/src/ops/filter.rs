use std::cmp::Ordering;

use serde_json::Value;

use crate::model::{extract, to_number, to_text};
use crate::step::{FilterConfig, FilterLiteral, FilterOperator};

/// Filtro estable: conserva el orden relativo de los items que cumplen el
/// predicado. No modifica `items`.
pub fn filter(items: &[Value], config: &FilterConfig) -> Vec<Value> {
    items.iter().filter(|item| matches(item, config)).cloned().collect()
}

/// Evalúa el predicado sobre un item.
///
/// Si el literal es numérico la comparación es numérica; si no, textual. Un
/// item sin valor comparable (campo ausente, `null`, secuencia anidada) no
/// cumple `>`, `<` ni `Equal`, y sí cumple `NotEqual`.
pub fn matches(item: &Value, config: &FilterConfig) -> bool {
    let ordering = extract(item, &config.field).and_then(|candidate| compare_to_literal(candidate, &config.value));
    match &config.operator {
        FilterOperator::GreaterThan => ordering == Some(Ordering::Greater),
        FilterOperator::LessThan => ordering == Some(Ordering::Less),
        FilterOperator::Equal => ordering == Some(Ordering::Equal),
        FilterOperator::NotEqual => ordering != Some(Ordering::Equal),
        FilterOperator::Unrecognized(_) => true,
    }
}

fn compare_to_literal(candidate: &Value, literal: &FilterLiteral) -> Option<Ordering> {
    match literal.numeric() {
        Some(n) => to_number(candidate)?.partial_cmp(&n),
        None => Some(str::cmp(&to_text(candidate)?, &literal.text())),
    }
}
