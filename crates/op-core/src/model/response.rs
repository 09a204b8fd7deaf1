use std::ops::Deref;

use serde::Serialize;
use serde_json::Value;

use super::{Context, Headers};
use crate::errors::OperationError;
use crate::status::StatusTable;

/// Vista de sólo lectura derivada del contexto terminal; es lo que consume la
/// capa HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Nombre canónico (p.ej. `ok`).
    pub status: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub headers: Headers,
    pub success: bool,
}

impl Response {
    pub fn from_context<U>(ctx: &Context<U>) -> Result<Self, OperationError> {
        let status = ctx.status()
                        .ok_or_else(|| OperationError::InvalidStatus("<absent>".into()))?;
        let canonical = StatusTable::canonicalize(status)?;
        Ok(Self { status: canonical.name().to_string(),
                  code: canonical.code(),
                  payload: ctx.payload().cloned(),
                  headers: ctx.headers().clone(),
                  success: canonical.is_success() })
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }
}

/// Contexto que ya salió del pipeline. Sólo expone lectura.
#[derive(Debug)]
pub struct Completed<U>(Context<U>);

impl<U> Completed<U> {
    pub(crate) fn new(ctx: Context<U>) -> Self {
        Self(ctx)
    }

    pub fn response(&self) -> Result<Response, OperationError> {
        Response::from_context(&self.0)
    }

    pub fn is_success(&self) -> bool {
        !self.0.is_failed()
    }
}

impl<U> Deref for Completed<U> {
    type Target = Context<U>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
