//! pipe-core: executor determinista de pipelines de datos.
//!
//! Un workflow es una lista ordenada de steps (`Source`, `Filter`, `Max`,
//! `Min`, `Count`, `Sum`). El executor hace pasar un único valor por los
//! steps en orden y devuelve el valor final o el primer error estructurado.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod ops;
pub mod step;
pub mod workflow;

pub use engine::{execute, Executor, WorkflowBuilder};
pub use errors::{ConfigError, ExecutionError, StepErrorReason};
pub use event::{DiscardEventStore, EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use model::Value;
pub use step::{AggregateConfig, FilterConfig, FilterLiteral, FilterOperator, Step, StepConfig, StepKind};
pub use workflow::Workflow;
