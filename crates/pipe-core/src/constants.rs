//! Constantes del motor core.
//!
//! `ENGINE_VERSION` forma parte del input de los fingerprints: un cambio de
//! versión invalida los fingerprints aunque steps y datos no cambien.

/// Versión lógica del motor. Mantener estable mientras la semántica de los
/// steps no cambie de forma incompatible.
pub const ENGINE_VERSION: &str = "P1.0";
