//! Payload estructurado de error y presets con los mensajes canónicos.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ValidationErrors;
use crate::status::names;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error_type: String,
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl ErrorPayload {
    pub fn new(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self { error_type: error_type.into(),
               error_message: error_message.into(),
               meta: Map::new() }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// `meta.errors` con el detalle campo -> mensajes.
    pub fn with_errors(self, errors: &ValidationErrors) -> Self {
        let errors = errors.iter()
                           .map(|(field, messages)| (field.clone(), Value::from(messages.clone())))
                           .collect::<Map<String, Value>>();
        self.with_meta("errors", Value::Object(errors))
    }

    pub fn into_value(self) -> Value {
        let mut out = Map::new();
        out.insert("error_type".into(), Value::String(self.error_type));
        out.insert("error_message".into(), Value::String(self.error_message));
        if !self.meta.is_empty() {
            out.insert("meta".into(), Value::Object(self.meta));
        }
        Value::Object(out)
    }

    pub fn not_found() -> Self {
        Self::new(names::NOT_FOUND, "The requested resource could not be found.")
    }

    pub fn unauthorized() -> Self {
        Self::new("unauthorized", "This resource requires authentication.")
    }

    pub fn payment_required() -> Self {
        Self::new("payment_required", "This resource requires payment.")
    }

    pub fn forbidden() -> Self {
        Self::new(names::FORBIDDEN, "You are not authorized to access the requested resource.")
    }

    pub fn service_unavailable() -> Self {
        Self::new("service_unavailable", "This resource is not available right now. Try later.")
    }

    pub fn internal_server_error() -> Self {
        Self::new("internal_server_error", "There was an error processing your request.")
    }

    pub fn unprocessable_entity(errors: &ValidationErrors) -> Self {
        Self::new(names::UNPROCESSABLE_ENTITY, "The provided resource is in an unexpected format.").with_errors(errors)
    }
}

impl From<ErrorPayload> for Value {
    fn from(payload: ErrorPayload) -> Self {
        payload.into_value()
    }
}
