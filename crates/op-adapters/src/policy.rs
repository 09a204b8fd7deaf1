//! Reglas de acceso a posts.
//!
//! - `index` / `show`: publicados para todos; borradores sólo para su autor
//!   o un admin.
//! - `create`: cualquier usuario autenticado.
//! - `update` / `destroy`: autor o admin.

use std::sync::Arc;

use op_core::{Policy, PolicyClass};

use crate::model::{Post, User};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostPolicy;

impl PostPolicy {
    fn can_read(user: Option<&User>, post: &Post) -> bool {
        post.published || Self::can_write(user, post)
    }

    fn can_write(user: Option<&User>, post: &Post) -> bool {
        user.is_some_and(|u| u.admin || post.is_authored_by(u))
    }
}

impl PolicyClass<User, Post> for PostPolicy {
    fn build(&self, user: Option<Arc<User>>, resource: Post) -> Box<dyn Policy<User, Post>> {
        Box::new(BoundPostPolicy { user, post: resource })
    }

    fn accessible_by(&self, user: Option<&User>, scope: Vec<Post>) -> Vec<Post> {
        scope.into_iter().filter(|post| Self::can_read(user, post)).collect()
    }
}

#[derive(Debug)]
pub struct BoundPostPolicy {
    user: Option<Arc<User>>,
    post: Post,
}

impl Policy<User, Post> for BoundPostPolicy {
    fn user(&self) -> Option<&User> {
        self.user.as_deref()
    }

    fn resource(&self) -> &Post {
        &self.post
    }

    fn resource_mut(&mut self) -> &mut Post {
        &mut self.post
    }

    fn into_resource(self: Box<Self>) -> Post {
        self.post
    }

    fn permits(&self, action: &str) -> bool {
        let user = self.user.as_deref();
        match action {
            "index" | "show" => PostPolicy::can_read(user, &self.post),
            "create" => user.is_some(),
            "update" | "destroy" => PostPolicy::can_write(user, &self.post),
            _ => false,
        }
    }
}
