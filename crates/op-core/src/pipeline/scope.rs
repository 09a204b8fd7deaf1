use serde_json::Value;

use crate::capability::Resolutions;
use crate::config::EngineConfig;
use crate::errors::OperationError;
use crate::flow::{Flow, Halt, Interrupt};
use crate::model::{Context, ErrorPayload, Params, Respond};
use crate::operation::{Operation, OperationConfig};
use crate::status::Status;

/// Superficie que reciben `Operation::call` y los hooks.
///
/// Posee el `Context` de la invocación durante todo el pipeline y da acceso
/// a la configuración inmutable de la operación. Los métodos de las
/// capacidades (`authorize`, `validate`, `decorate`, ...) viven en
/// `crate::capability`.
pub struct Scope<'a, O: Operation> {
    pub(crate) context: Context<O::User>,
    pub(crate) config: &'a OperationConfig<O>,
    pub(crate) action: &'a str,
    pub(crate) resolved: Resolutions<O>,
}

impl<'a, O: Operation> Scope<'a, O> {
    pub(crate) fn new(context: Context<O::User>, config: &'a OperationConfig<O>, action: &'a str) -> Self {
        Self { context,
               config,
               action,
               resolved: Resolutions::default() }
    }

    pub(crate) fn into_context(self) -> Context<O::User> {
        self.context
    }

    pub fn context(&self) -> &Context<O::User> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context<O::User> {
        &mut self.context
    }

    pub fn params(&self) -> &Params {
        self.context.params()
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.context.param(name)
    }

    pub fn current_user(&self) -> Option<&O::User> {
        self.context.current_user()
    }

    /// Identidad canónica de la operación (p.ej. `bulk_update`).
    pub fn action(&self) -> &str {
        self.action
    }

    pub fn engine_config(&self) -> &EngineConfig {
        self.config.engine()
    }

    pub fn respond_with(&mut self, respond: Respond) {
        self.context.apply(respond);
    }

    /// `respond_with` seguido de `Halt`. Pensado para `return` o `?`.
    pub fn respond_and_halt<T>(&mut self, respond: Respond) -> Flow<T> {
        self.respond_with(respond);
        self.halt()
    }

    pub fn head(&mut self, status: impl Into<Status>) {
        self.context.set_status(status);
    }

    pub fn head_and_halt<T>(&mut self, status: impl Into<Status>) -> Flow<T> {
        self.head(status);
        self.halt()
    }

    pub fn halt<T>(&self) -> Flow<T> {
        Err(Interrupt::Halt(Halt))
    }

    /// Responde con el payload de error; el status es su `error_type`.
    pub fn error(&mut self, error: ErrorPayload) {
        let status = Status::name(error.error_type.clone());
        self.respond_with(Respond::new().status(status).payload(error));
    }

    pub fn error_and_halt<T>(&mut self, error: ErrorPayload) -> Flow<T> {
        self.error(error);
        self.halt()
    }

    /// Atajo para abortar con un fallo inesperado.
    pub fn fault<T>(&self, message: impl Into<String>) -> Flow<T> {
        Err(Interrupt::Fault(OperationError::Fault(message.into())))
    }
}
