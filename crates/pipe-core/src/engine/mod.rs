//! Engine: executor del pipeline y builder de workflows.
//!
//! El executor es un intérprete síncrono de una sola pasada: recorre los
//! steps en orden manteniendo un único "valor actual" y se detiene en la
//! primera precondición fallida.

pub mod builder;
pub mod executor;

pub use builder::WorkflowBuilder;
pub use executor::{execute, Executor};

pub use crate::event::{DiscardEventStore, EventStore, InMemoryEventStore, RunEvent, RunEventKind};
