use std::sync::Arc;

use op_core::status::names;
use op_core::{Flow, Operation, Respond, Scope};

use super::POSTS_PATH;
use crate::model::{Post, User};
use crate::store::PostStore;

/// Crea un post del usuario actual a partir de `title`, `body` y
/// `published`. Responde `created` con `Location`.
#[derive(Debug, Clone)]
pub struct Create {
    store: Arc<PostStore>,
}

impl Create {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self { store }
    }
}

impl Operation for Create {
    type User = User;
    type Resource = Post;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let author_id = scope.current_user().map(|u| u.id).unwrap_or_default();
        let post = scope.authorize_or_halt(Post::draft(author_id))?.into_resource();
        let post = scope.validate_or_halt(post)?.into_resource();

        let post = self.store.insert(post);
        let location = format!("{POSTS_PATH}/{}", post.id);
        let payload = scope.decorate(post).into_value()?;
        scope.respond_with(Respond::new().status(names::CREATED)
                                         .payload(payload)
                                         .header("Location", location));
        Ok(())
    }
}
