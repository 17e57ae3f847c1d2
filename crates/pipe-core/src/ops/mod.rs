//! Operaciones puras sobre el valor actual: predicado de filtro y reducers.
//!
//! Ninguna devuelve error: los valores que no se pueden convertir degradan de
//! forma permisiva (el operador desconocido deja pasar todo, la suma cuenta 0,
//! max/min sobre nada devuelven `null`).

pub mod aggregate;
pub mod filter;

pub use aggregate::{count, max_by_field, min_by_field, sum_by_field, AggregateOperation};
pub use filter::{filter, matches};
