//! Definición de workflow: lista ordenada de steps validada.

mod definition;

pub use definition::{definition_hash, Workflow};
