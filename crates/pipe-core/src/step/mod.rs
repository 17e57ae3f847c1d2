//! Definiciones relacionadas a Steps.
//!
//! Un Step es una instrucción del pipeline: una fuente de datos, un filtro o
//! un agregado. Este módulo define:
//! - `Step` y `StepKind`: la unidad inmutable que consume el executor.
//! - `StepConfig`: unión etiquetada de configuraciones por tipo de step
//!   (`FilterConfig`, `AggregateConfig`), validada al construir el step.

pub mod config;
pub mod definition;

pub use config::{AggregateConfig, FilterConfig, FilterLiteral, FilterOperator, StepConfig};
pub use definition::{Step, StepKind};
