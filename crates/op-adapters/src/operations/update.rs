use std::sync::Arc;

use op_core::{ErrorPayload, Flow, Operation, Respond, Scope};

use super::id_param;
use crate::model::{Post, User};
use crate::store::PostStore;

/// Actualiza `title`, `body` o `published` de un post existente.
#[derive(Debug, Clone)]
pub struct Update {
    store: Arc<PostStore>,
}

impl Update {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self { store }
    }
}

impl Operation for Update {
    type User = User;
    type Resource = Post;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let Some(post) = id_param(scope).and_then(|id| self.store.get(id)) else {
            return scope.error_and_halt(ErrorPayload::not_found());
        };
        let post = scope.authorize_or_halt(post)?.into_resource();
        let post = scope.validate_or_halt(post)?.into_resource();

        // Puede desaparecer entre la lectura y la escritura.
        let Some(post) = self.store.update(post) else {
            return scope.error_and_halt(ErrorPayload::not_found());
        };
        let payload = scope.decorate(post).into_value()?;
        scope.respond_with(Respond::new().payload(payload));
        Ok(())
    }
}
