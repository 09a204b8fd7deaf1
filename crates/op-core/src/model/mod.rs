//! Modelos neutrales (Context, Seed, Respond, Response, ErrorPayload,...)

pub mod context;
pub mod error_payload;
pub mod resource;
pub mod respond;
pub mod response;

use indexmap::IndexMap;

pub use context::{Context, Seed};
pub use error_payload::ErrorPayload;
pub use resource::Resource;
pub use respond::Respond;
pub use response::{Completed, Response};

/// Parámetros de entrada de la invocación.
pub type Params = serde_json::Map<String, serde_json::Value>;
/// Headers de salida; conservan el orden de inserción.
pub type Headers = IndexMap<String, String>;
/// Relación -> URL, en orden de declaración.
pub type Links = IndexMap<String, String>;
/// Campo -> mensajes legibles, tal como los reporta un contrato.
pub type ValidationErrors = IndexMap<String, Vec<String>>;
