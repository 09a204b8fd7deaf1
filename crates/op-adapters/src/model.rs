use op_core::{Resource, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_TITLE_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub admin: bool,
}

impl User {
    pub fn new(id: u64) -> Self {
        Self { id, admin: false }
    }

    pub fn admin(id: u64) -> Self {
        Self { id, admin: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author_id: u64,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub published: bool,
}

impl Post {
    /// Borrador sin persistir (id 0).
    pub fn draft(author_id: u64) -> Self {
        Self { id: 0,
               author_id,
               title: String::new(),
               body: String::new(),
               published: false }
    }

    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author_id == user.id
    }
}

/// Reglas de contenido compartidas por `Post::validate` y `PostContract`.
pub(crate) fn content_errors(title: &str, body: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if title.trim().is_empty() {
        errors.entry("title".into()).or_default().push("must be filled".into());
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.entry("title".into())
              .or_default()
              .push(format!("size cannot be greater than {MAX_TITLE_LEN}"));
    }
    if body.trim().is_empty() {
        errors.entry("body".into()).or_default().push("must be filled".into());
    }
    errors
}

impl Resource for Post {
    /// Atributos asignables: `title`, `body`, `published`. `id` y
    /// `author_id` no se copian nunca desde params.
    fn assign(&mut self, name: &str, value: &Value) -> bool {
        match (name, value) {
            ("title", Value::String(title)) => self.title = title.clone(),
            ("body", Value::String(body)) => self.body = body.clone(),
            ("published", Value::Bool(published)) => self.published = *published,
            _ => return false,
        }
        true
    }

    fn validate(&self) -> Option<bool> {
        Some(content_errors(&self.title, &self.body).is_empty())
    }

    fn errors(&self) -> ValidationErrors {
        content_errors(&self.title, &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_content_attributes_are_assignable() {
        let mut post = Post::draft(7);
        assert!(post.assign("title", &json!("Hi")));
        assert!(post.assign("published", &json!(true)));
        assert!(!post.assign("author_id", &json!(1)));
        assert!(!post.assign("title", &json!(3)));
        assert_eq!(post.title, "Hi");
        assert_eq!(post.author_id, 7);
        assert!(post.published);
    }

    #[test]
    fn title_length_is_bounded() {
        let long = "x".repeat(MAX_TITLE_LEN + 1);
        let errors = content_errors(&long, "body");
        assert_eq!(errors.get("title").map(Vec::len), Some(1));
        assert!(content_errors(&"x".repeat(MAX_TITLE_LEN), "body").is_empty());
    }
}
