use op_core::DecoratorClass;
use serde_json::{json, Value};

use crate::model::Post;

/// Representación pública de un post.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostDecorator;

impl DecoratorClass<Post> for PostDecorator {
    fn represent(&self, post: &Post) -> Value {
        json!({
            "id": post.id,
            "title": post.title,
            "body": post.body,
            "published": post.published,
            "author": { "id": post.author_id },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nests_the_author() {
        let mut post = Post::draft(4);
        post.id = 9;
        let value = PostDecorator.represent(&post);
        assert_eq!(value["author"], json!({ "id": 4 }));
        assert_eq!(PostDecorator.represent_collection(&[post]).as_array().map(Vec::len), Some(1));
    }
}
