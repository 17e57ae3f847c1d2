//! Parseo del texto de datos que introduce el usuario para un step Source.
//!
//! Formatos aceptados:
//! - Un array JSON (el texto, sin espacios iniciales, empieza por `[`).
//! - Valores separados por comas: cada token se recorta; si es un literal
//!   numérico pasa a número, si no queda como string. Los tokens vacíos se
//!   descartan, así que un texto vacío da una secuencia vacía.
use pipe_core::model::{number_value, parse_numeric_literal};
use serde_json::Value;

use crate::errors::AppError;

pub fn parse_payload(text: &str) -> Result<Value, AppError> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str::<Value>(trimmed).map_err(|e| {
            AppError::Payload(format!("use valores separados por comas o un array JSON ({e})"))
        });
    }

    let items = trimmed.split(',')
                       .map(str::trim)
                       .filter(|token| !token.is_empty())
                       .map(|token| match parse_numeric_literal(token) {
                           Some(n) => number_value(n),
                           None => Value::String(token.to_string()),
                       })
                       .collect();
    Ok(Value::Array(items))
}
