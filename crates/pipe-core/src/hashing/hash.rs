//! Hash de valores JSON (blake3 sobre la forma canónica).

use serde_json::Value;

use super::to_canonical_json;

/// Hex del hash blake3 de `to_canonical_json(value)`; dos valores iguales
/// con distinto orden de claves dan el mismo resultado.
pub fn hash_value(value: &Value) -> String {
    blake3::hash(to_canonical_json(value).as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_hash() {
        assert_eq!(hash_value(&json!({"a": 1, "b": [2]})), hash_value(&json!({"b": [2], "a": 1})));
        assert_ne!(hash_value(&json!([1, 2])), hash_value(&json!([2, 1])));
    }
}
