//! Errores que pueden escapar del pipeline.
//!
//! `Halt` no aparece aquí: no es un error. Los rechazos de autorización o
//! validación tampoco; se representan como datos en el contexto terminal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum OperationError {
    /// El status presente al canonicalizar no existe en `StatusTable`.
    #[error("{0} is not a valid status")]
    InvalidStatus(String),
    /// Se invocó el `call` por defecto de una operación.
    #[error("operation `{0}` does not implement call")]
    NotImplemented(String),
    /// Configuración de capacidades o hooks inválida (se detecta en `build`).
    #[error("misconfigured operation: {0}")]
    Misconfigured(String),
    #[error("serialization: {0}")]
    Serialization(String),
    /// Fallo inesperado de la lógica de negocio o de un colaborador.
    #[error("fault: {0}")]
    Fault(String),
}

impl From<serde_json::Error> for OperationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
