//! Operaciones del dominio posts.

mod create;
mod index;
mod ping;
mod show;
mod update;

use op_core::{Operation, Scope};
use serde_json::Value;

pub use create::Create;
pub use index::Index;
pub use ping::Ping;
pub use show::Show;
pub use update::Update;

/// Base de las URLs que se devuelven en `Location` y `Link`.
pub const POSTS_PATH: &str = "/posts";

/// `id` de los params; acepta número o texto numérico.
pub(crate) fn id_param<O: Operation>(scope: &Scope<'_, O>) -> Option<u64> {
    match scope.param("id")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Entero positivo de los params, o `default`.
pub(crate) fn positive_param<O: Operation>(scope: &Scope<'_, O>, name: &str, default: usize) -> usize {
    let value = match scope.param(name) {
        Some(Value::Number(n)) => n.as_u64().map(|v| v as usize),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    };
    value.filter(|v| *v > 0).unwrap_or(default)
}
