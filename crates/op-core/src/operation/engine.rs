use log::{debug, warn};

use super::{EngineBuilder, Operation, OperationConfig};
use crate::errors::OperationError;
use crate::event::LifecycleEventKind;
use crate::model::{Completed, Response, Seed};
use crate::pipeline::{HookPipeline, Scope};

/// Operación lista para invocar: lógica de negocio, configuración congelada
/// y pipeline ya armado. Es `Sync`; invocaciones concurrentes no comparten
/// estado mutable.
pub struct OperationEngine<O: Operation> {
    operation: O,
    config: OperationConfig<O>,
    pipeline: HookPipeline<O>,
    action: String,
}

impl<O: Operation> OperationEngine<O> {
    pub fn builder(operation: O) -> EngineBuilder<O> {
        EngineBuilder::new(operation)
    }

    /// Motor sin capacidades ni hooks de usuario.
    pub fn new(operation: O) -> Result<Self, OperationError> {
        Self::builder(operation).build()
    }

    pub(crate) fn from_parts(operation: O, config: OperationConfig<O>, pipeline: HookPipeline<O>, action: String) -> Self {
        Self { operation,
               config,
               pipeline,
               action }
    }

    /// Identidad canónica (p.ej. `create`).
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn operation(&self) -> &O {
        &self.operation
    }

    pub fn pipeline(&self) -> &HookPipeline<O> {
        &self.pipeline
    }

    pub fn config(&self) -> &OperationConfig<O> {
        &self.config
    }

    /// Ejecuta una invocación completa. `Halt` y los rechazos de
    /// autorización/validación terminan en `Ok`; sólo los fallos escapan.
    pub fn invoke(&self, seed: Seed<O::User>) -> Result<Completed<O::User>, OperationError> {
        let mut context = seed.into_context();
        let id = context.id();
        debug!("invoke:start id={id} operation={}", self.action);
        context.record(LifecycleEventKind::InvocationStarted { operation: self.action.clone() });

        let mut scope = Scope::new(context, &self.config, &self.action);
        let outcome = self.pipeline.run(&self.operation, &mut scope);
        let mut context = scope.into_context();

        if let Err(err) = outcome {
            warn!("invoke:done id={id} operation={} fault: {err}", self.action);
            return Err(err);
        }

        let status = context.status().map(|s| s.to_string()).unwrap_or_default();
        let failed = context.is_failed();
        debug!("invoke:done id={id} operation={} status={status} failed={failed}", self.action);
        context.record(LifecycleEventKind::InvocationFinished { status, failed });
        Ok(Completed::new(context))
    }

    /// `invoke` reducido al descriptor de respuesta.
    pub fn call(&self, seed: Seed<O::User>) -> Result<Response, OperationError> {
        self.invoke(seed)?.response()
    }
}
