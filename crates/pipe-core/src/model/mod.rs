//! Modelo de datos neutral que fluye entre steps.

pub mod value;

pub use value::{compare, extract, number_value, parse_numeric_literal, to_number, to_text, Value};
