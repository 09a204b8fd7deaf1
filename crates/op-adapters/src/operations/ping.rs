use op_core::{Flow, Operation, Respond, Scope};
use serde_json::json;

use crate::model::{Post, User};

/// Comprobación de vida: responde `{"pong": <message>}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ping;

impl Operation for Ping {
    type User = User;
    type Resource = Post;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let message = scope.param("message").cloned().unwrap_or_else(|| json!("pong"));
        scope.respond_with(Respond::new().payload(json!({ "pong": message })));
        Ok(())
    }
}
