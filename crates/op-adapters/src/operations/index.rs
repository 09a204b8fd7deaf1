use std::sync::Arc;

use op_core::{Flow, Operation, Respond, Scope};

use super::{positive_param, POSTS_PATH};
use crate::model::{Post, User};
use crate::store::PostStore;

pub const DEFAULT_PER_PAGE: usize = 10;

/// Lista paginada de los posts visibles para el usuario actual (`page`,
/// `per_page`), con links `first` / `prev` / `next` / `last`.
#[derive(Debug, Clone)]
pub struct Index {
    store: Arc<PostStore>,
}

impl Index {
    pub fn new(store: Arc<PostStore>) -> Self {
        Self { store }
    }
}

fn page_url(page: usize, per_page: usize) -> String {
    format!("{POSTS_PATH}?page={page}&per_page={per_page}")
}

impl Operation for Index {
    type User = User;
    type Resource = Post;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let page = positive_param(scope, "page", 1);
        let per_page = positive_param(scope, "per_page", DEFAULT_PER_PAGE);

        let visible = scope.authorize_collection(self.store.all());
        let total = visible.len();
        let last = total.div_ceil(per_page).max(1);
        let items: Vec<Post> = visible.into_iter().skip((page - 1).saturating_mul(per_page)).take(per_page).collect();

        let mut respond = Respond::new().header("X-Total-Count", total.to_string())
                                        .link("first", page_url(1, per_page))
                                        .link("last", page_url(last, per_page));
        if page > 1 {
            respond = respond.link("prev", page_url((page - 1).min(last), per_page));
        }
        if page < last {
            respond = respond.link("next", page_url(page + 1, per_page));
        }

        let payload = scope.decorate_collection(items).into_value()?;
        scope.respond_with(respond.payload(payload));
        Ok(())
    }
}
