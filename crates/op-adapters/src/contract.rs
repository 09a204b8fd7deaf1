use op_core::{Contract, ContractClass, Params, Resource, ValidationErrors};
use serde_json::Value;

use crate::model::{content_errors, Post};

/// Valida los params contra el post actual: los campos ausentes en params
/// conservan el valor del post. Si es válido, sincroniza los params sobre el
/// post.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostContract;

impl ContractClass<Post> for PostContract {
    fn build(&self, resource: Post) -> Box<dyn Contract<Post>> {
        Box::new(BoundPostContract { post: resource,
                                     errors: ValidationErrors::new() })
    }
}

#[derive(Debug)]
pub struct BoundPostContract {
    post: Post,
    errors: ValidationErrors,
}

fn text<'a>(params: &'a Params, key: &str, fallback: &'a str) -> &'a str {
    params.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

impl Contract<Post> for BoundPostContract {
    fn validate(&mut self, params: &Params) -> bool {
        self.errors = content_errors(text(params, "title", &self.post.title),
                                     text(params, "body", &self.post.body));
        if let Some(published) = params.get("published") {
            if !published.is_boolean() {
                self.errors.entry("published".into()).or_default().push("must be boolean".into());
            }
        }
        if !self.errors.is_empty() {
            return false;
        }
        for (name, value) in params {
            self.post.assign(name, value);
        }
        true
    }

    fn errors(&self) -> ValidationErrors {
        self.errors.clone()
    }

    fn resource(&self) -> &Post {
        &self.post
    }

    fn into_resource(self: Box<Self>) -> Post {
        self.post
    }
}
