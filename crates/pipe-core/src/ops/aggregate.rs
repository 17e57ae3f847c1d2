//! Reducers de agregación (max/min/count/sum).

use std::cmp::Ordering;

use serde_json::Value;

use crate::model::{compare, extract, number_value, to_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOperation {
    Max,
    Min,
    Count,
    Sum,
}

impl AggregateOperation {
    /// Aplica la operación. `field` no se usa en `Count`.
    pub fn apply(self, value: &Value, field: &str) -> Value {
        match self {
            Self::Max => max_by_field(value, field),
            Self::Min => min_by_field(value, field),
            Self::Count => count(value),
            Self::Sum => sum_by_field(value, field),
        }
    }
}

/// Elemento con el mayor valor en `field`. En empate gana el primero.
/// `null` si `value` no es una secuencia o está vacía.
///
/// El primer elemento es el acumulador inicial aunque no tenga `field` (o no
/// sea comparable): sólo lo desplaza un item comparable y estrictamente mayor,
/// así que `[{w:1},{v:9}]` por `v` devuelve `{w:1}`.
pub fn max_by_field(value: &Value, field: &str) -> Value {
    select(value, field, Ordering::Greater)
}

/// Simétrico a `max_by_field`.
pub fn min_by_field(value: &Value, field: &str) -> Value {
    select(value, field, Ordering::Less)
}

/// Longitud de la secuencia; un valor suelto cuenta como un item.
pub fn count(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::from(items.len()),
        _ => Value::from(1),
    }
}

/// Suma en coma flotante del campo extraído; lo no numérico suma 0. Una
/// entrada que no es secuencia da 0.
pub fn sum_by_field(value: &Value, field: &str) -> Value {
    let Value::Array(items) = value else {
        return Value::from(0);
    };
    let total: f64 = items.iter()
                          .map(|item| extract(item, field).and_then(to_number).unwrap_or(0.0))
                          .sum();
    number_value(total)
}

// Reducción izquierda-a-derecha: el acumulador sólo se reemplaza si el item es
// estrictamente mejor, así los empates conservan el primero.
fn select(value: &Value, field: &str, wanted: Ordering) -> Value {
    let Value::Array(items) = value else {
        return Value::Null;
    };
    let mut iter = items.iter();
    let Some(first) = iter.next() else {
        return Value::Null;
    };
    let best = iter.fold(first, |acc, item| match (extract(item, field), extract(acc, field)) {
                       (Some(candidate), Some(current)) if compare(candidate, current) == Some(wanted) => item,
                       _ => acc,
                   });
    best.clone()
}
