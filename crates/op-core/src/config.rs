//! Configuración del motor desde variables de entorno.
//! Usa convención `OPFLOW_*`; carga `.env` una sola vez si existe.

use std::env;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

pub const LINK_HEADER_VAR: &str = "OPFLOW_LINK_HEADER";
pub const COPY_PARAMS_VAR: &str = "OPFLOW_COPY_PARAMS";

/// Extensiones opcionales del pipeline. Se congela dentro de cada
/// `OperationEngine` al hacer `build`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Registra el after-hook que construye el header `Link` desde `links`.
    pub link_header: bool,
    /// Copia los params sobre los atributos mutables del recurso de la policy
    /// antes de evaluar el predicado.
    pub copy_params: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { link_header: true,
               copy_params: true }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente arbitraria de valores.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self { link_header: flag(&lookup, LINK_HEADER_VAR, defaults.link_header),
               copy_params: flag(&lookup, COPY_PARAMS_VAR, defaults.copy_params) }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        other => {
            warn!("{key}: unrecognised value {other:?}, keeping default {default}");
            default
        }
    }
}

/// Carga `.env` ahora en vez de esperar al primer `EngineConfig::from_env`.
/// El binario lo usa antes de leer `RUST_LOG`.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
