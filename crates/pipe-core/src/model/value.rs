//! Valor dinámico y reglas explícitas de coerción.
//!
//! El dato que fluye entre steps es JSON genérico (`serde_json::Value`): un
//! escalar (número o string), `null`, o una secuencia de escalares/records. Un
//! record es un objeto `campo -> escalar`.
//!
//! Orden total documentado para comparar dos valores:
//! 1. Si ambos se pueden convertir a número (números, strings con un literal
//!    numérico, booleanos) se comparan numéricamente.
//! 2. Si no, y ambos tienen forma textual, se comparan como strings.
//! 3. En otro caso son incomparables (`None`). Colecciones mixtas caen en esta
//!    misma regla; nunca se produce un error.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Number;

pub use serde_json::Value;

/// Mayor entero representable sin pérdida en un f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Valor de comparación de un item: para records se lee `field`, para
/// escalares se usa el propio item (el nombre de campo se ignora). Las
/// secuencias anidadas no tienen valor de comparación.
pub fn extract<'a>(item: &'a Value, field: &str) -> Option<&'a Value> {
    match item {
        Value::Object(map) => map.get(field),
        Value::Array(_) => None,
        scalar => Some(scalar),
    }
}

/// Interpreta `s` como literal numérico. Vacío o no finito => `None`.
pub fn parse_numeric_literal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Coerción numérica. `null`, records y secuencias no son numéricos.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_numeric_literal(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Forma textual de un escalar.
pub fn to_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(format_number(n))),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        _ => None,
    }
}

/// Compara según el orden documentado en el módulo.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (to_number(a), to_number(b)) {
        return x.partial_cmp(&y);
    }
    match (to_text(a), to_text(b)) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => None,
    }
}

/// Convierte un resultado numérico en `Value`. Los valores enteros se emiten
/// como enteros JSON (`7`, no `7.0`); un resultado no finito es `null`.
pub fn number_value(f: f64) -> Value {
    if !f.is_finite() {
        return Value::Null;
    }
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Value::from(f as i64);
    }
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_reads_field_from_records_and_ignores_it_for_scalars() {
        let rec = json!({"v": 3});
        assert_eq!(extract(&rec, "v"), Some(&json!(3)));
        assert_eq!(extract(&rec, "missing"), None);
        assert_eq!(extract(&json!(5), "v"), Some(&json!(5)));
        assert_eq!(extract(&json!([1, 2]), "v"), None);
    }

    #[test]
    fn numeric_literals() {
        assert_eq!(parse_numeric_literal(" 2 "), Some(2.0));
        assert_eq!(parse_numeric_literal("-1.5e1"), Some(-15.0));
        assert_eq!(parse_numeric_literal(""), None);
        assert_eq!(parse_numeric_literal("abc"), None);
        assert_eq!(parse_numeric_literal("inf"), None);
        assert_eq!(parse_numeric_literal("NaN"), None);
    }

    #[test]
    fn to_number_coerces_strings_and_bools() {
        assert_eq!(to_number(&json!("10")), Some(10.0));
        assert_eq!(to_number(&json!(true)), Some(1.0));
        assert_eq!(to_number(&json!(null)), None);
        assert_eq!(to_number(&json!({"a": 1})), None);
    }

    #[test]
    fn compare_prefers_numbers_then_strings() {
        // "10" y "9" son literales numéricos: comparación numérica, no lexicográfica
        assert_eq!(compare(&json!("10"), &json!("9")), Some(Ordering::Greater));
        assert_eq!(compare(&json!("b"), &json!("a")), Some(Ordering::Greater));
        // mixto: el número se compara por su forma textual
        assert_eq!(compare(&json!(5), &json!("abc")), Some(Ordering::Less));
        assert_eq!(compare(&json!(null), &json!(1)), None);
    }

    #[test]
    fn number_value_emits_integers_when_integral() {
        assert_eq!(number_value(7.0), json!(7));
        assert_eq!(number_value(2.5), json!(2.5));
        assert_eq!(number_value(f64::INFINITY), Value::Null);
    }

    #[test]
    fn text_form_of_integral_float_has_no_fraction() {
        assert_eq!(to_text(&json!(5.0)).as_deref(), Some("5"));
        assert_eq!(to_text(&json!(2.5)).as_deref(), Some("2.5"));
    }
}
