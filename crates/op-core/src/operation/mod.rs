//! Operaciones: el trait que implementa la lógica de negocio, su
//! configuración inmutable y el motor que las invoca.

mod builder;
mod engine;
mod identity;

use crate::errors::OperationError;
use crate::flow::Flow;
use crate::model::Resource;
use crate::pipeline::Scope;

pub use builder::{EngineBuilder, OperationConfig};
pub use engine::OperationEngine;
pub use identity::canonical_identity;

/// Unidad de lógica de negocio invocada una vez por petición.
///
/// `User` es el usuario actual (opaco para el motor) y `Resource` el tipo de
/// recurso sobre el que operan las capacidades. Operaciones sin recurso
/// usan `()`.
pub trait Operation: Sized + Send + Sync + 'static {
    type User: Send + Sync + 'static;
    type Resource: Resource + 'static;

    /// Nombre declarado; de él se deriva la identidad canónica.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Cuerpo de la operación. Sin implementar falla con `NotImplemented`.
    fn call(&self, _scope: &mut Scope<'_, Self>) -> Flow {
        Err(OperationError::NotImplemented(self.name().to_string()).into())
    }
}
