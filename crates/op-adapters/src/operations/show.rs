use std::sync::Arc;

use op_core::{ErrorPayload, Flow, Operation, Respond, Scope};

use super::{id_param, POSTS_PATH};
use crate::model::{Post, User};
use crate::store::PostStore;

#[derive(Debug, Clone)]
pub struct Show {
    store: Arc<PostStore>,
}

impl Show {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self { store }
    }
}

impl Operation for Show {
    type User = User;
    type Resource = Post;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let Some(post) = id_param(scope).and_then(|id| self.store.get(id)) else {
            return scope.error_and_halt(ErrorPayload::not_found());
        };
        let post = scope.authorize_or_halt(post)?.into_resource();

        let link = format!("{POSTS_PATH}/{}", post.id);
        let payload = scope.decorate(post).into_value()?;
        scope.respond_with(Respond::new().payload(payload)
                                         .link("self", link)
                                         .link("collection", POSTS_PATH));
        Ok(())
    }
}
