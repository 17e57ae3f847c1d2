//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

pub const ENV_LOG: &str = "PIPEFLOW_LOG";
pub const ENV_TRACE: &str = "PIPEFLOW_TRACE";
pub const ENV_WORKFLOW: &str = "PIPEFLOW_WORKFLOW";

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Filtro de logs (sintaxis de `EnvFilter`), p.ej. `info` o `pipe_core=debug`.
    pub log_filter: String,
    /// Imprimir la traza de eventos de cada run.
    pub trace: bool,
    /// Workflow a ejecutar cuando el CLI no recibe uno.
    pub default_workflow: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_filter: "info".to_string(),
               trace: false,
               default_workflow: None }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construye la config a partir de una función de lookup (facilita tests sin tocar el entorno).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log_filter = lookup(ENV_LOG).filter(|v| !v.trim().is_empty())
                                        .unwrap_or(defaults.log_filter);
        let trace = lookup(ENV_TRACE).map(|v| parse_flag(&v)).unwrap_or(defaults.trace);
        let default_workflow = lookup(ENV_WORKFLOW).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self { log_filter, trace, default_workflow }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
