use serde_json::Value;

use super::{Headers, Links};
use crate::status::Status;

/// Argumentos de `respond_with`: cada campo ausente deja intacto el campo
/// correspondiente del contexto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Respond {
    status: Option<Status>,
    payload: Option<Value>,
    headers: Headers,
    links: Links,
}

impl Respond {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: impl Into<Status>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn link(mut self, relation: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.insert(relation.into(), url.into());
        self
    }

    pub fn links(mut self, links: Links) -> Self {
        self.links.extend(links);
        self
    }

    pub(crate) fn into_parts(self) -> (Option<Status>, Option<Value>, Headers, Links) {
        (self.status, self.payload, self.headers, self.links)
    }
}
