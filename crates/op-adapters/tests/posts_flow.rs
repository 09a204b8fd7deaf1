use std::sync::Arc;

use op_adapters::app::{API_VERSION_HEADER, OPERATIONS};
use op_adapters::{PostStore, PostsApp, User};
use op_core::{EngineConfig, Response, Seed};
use serde_json::{json, Value};

fn app() -> PostsApp {
    PostsApp::new(Arc::new(PostStore::seeded()), EngineConfig::default()).expect("app builds")
}

fn call(app: &PostsApp, name: &str, seed: Seed<User>) -> Response {
    app.call(name, seed).expect("known operation").expect("no fault")
}

#[test]
fn ping_echoes_the_message() {
    let response = call(&app(), "ping", Seed::new().param("message", "hi"));
    assert!(response.success);
    assert_eq!(response.payload, Some(json!({ "pong": "hi" })));
    assert_eq!(response.headers.get(API_VERSION_HEADER).map(String::as_str), Some("1"));
}

#[test]
fn unknown_operations_are_reported() {
    let app = app();
    assert!(app.call("destroy", Seed::new()).is_none());
    for name in OPERATIONS {
        assert!(app.call(name, Seed::new()).is_some(), "{name} should dispatch");
    }
}

#[test]
fn create_requires_a_user() {
    let app = app();
    let response = call(&app, "create", Seed::new().params(json!({ "title": "T", "body": "B" })));
    assert_eq!(response.code, 403);
    assert_eq!(app.store().len(), 3);
}

#[test]
fn create_validates_and_persists() {
    let app = app();
    let invalid = call(&app, "create", Seed::new().user(User::new(3)).param("title", ""));
    assert_eq!(invalid.code, 422);
    let errors = invalid.payload.as_ref().and_then(|p| p.pointer("/meta/errors")).cloned();
    assert_eq!(errors, Some(json!({ "title": ["must be filled"], "body": ["must be filled"] })));
    assert_eq!(app.store().len(), 3);

    let created = call(&app,
                       "create",
                       Seed::new().user(User::new(3))
                                  .params(json!({ "title": "Fresh", "body": "Text", "published": true })));
    assert_eq!(created.code, 201);
    assert_eq!(created.headers.get("Location").map(String::as_str), Some("/posts/4"));
    let payload = created.payload.expect("payload");
    assert_eq!(payload["title"], json!("Fresh"));
    assert_eq!(payload["author"], json!({ "id": 3 }));
    assert_eq!(app.store().len(), 4);
}

#[test]
fn index_hides_foreign_drafts_and_paginates() {
    let app = app();
    let guest = call(&app, "index", Seed::new());
    let titles: Vec<Value> = guest.payload
                                  .and_then(|p| p.as_array().cloned())
                                  .unwrap_or_default()
                                  .into_iter()
                                  .map(|p| p["title"].clone())
                                  .collect();
    assert_eq!(titles, vec![json!("Hello world"), json!("Second author")]);
    assert_eq!(guest.headers.get("X-Total-Count").map(String::as_str), Some("2"));

    let author = call(&app,
                      "index",
                      Seed::new().user(User::new(1))
                                 .params(json!({ "page": 2, "per_page": 2 })));
    assert_eq!(author.payload.as_ref().and_then(Value::as_array).map(Vec::len), Some(1));
    let link = author.headers.get("Link").cloned().unwrap_or_default();
    assert!(link.contains("</posts?page=1&per_page=2>; rel=\"first\""));
    assert!(link.contains("rel=\"prev\""));
    assert!(!link.contains("rel=\"next\""));
}

#[test]
fn show_handles_missing_and_private_posts() {
    let app = app();
    let missing = call(&app, "show", Seed::new().param("id", 42));
    assert_eq!(missing.code, 404);
    assert_eq!(missing.payload.as_ref().map(|p| p["error_type"].clone()), Some(json!("not_found")));

    let private = call(&app, "show", Seed::new().user(User::new(2)).param("id", "2"));
    assert_eq!(private.code, 403);

    let own = call(&app, "show", Seed::new().user(User::new(1)).param("id", "2"));
    assert!(own.success);
    assert_eq!(own.headers.get("Link").map(String::as_str),
               Some("</posts/2>; rel=\"self\",\n</posts>; rel=\"collection\""));
}

#[test]
fn update_is_limited_to_authors_and_admins() {
    let app = app();
    let foreign = call(&app, "update", Seed::new().user(User::new(2)).params(json!({ "id": 1, "title": "Mine" })));
    assert_eq!(foreign.code, 403);
    assert_eq!(app.store().get(1).map(|p| p.title), Some("Hello world".to_string()));

    let admin = call(&app, "update", Seed::new().user(User::admin(9)).params(json!({ "id": 1, "title": "Edited" })));
    assert!(admin.success);
    assert_eq!(app.store().get(1).map(|p| p.title), Some("Edited".to_string()));
    assert_eq!(app.store().get(1).map(|p| p.body), Some("Hello world.".to_string()));
}

#[test]
fn update_rejects_overlong_titles() {
    let app = app();
    let response = call(&app,
                        "update",
                        Seed::new().user(User::new(1))
                                   .params(json!({ "id": 1, "title": "x".repeat(121) })));
    assert_eq!(response.code, 422);
    assert_eq!(app.store().get(1).map(|p| p.title), Some("Hello world".to_string()));
}

#[test]
fn param_copying_is_configurable() {
    // Con copia de params, el título entrante llega a la policy; sin copia
    // la policy ve el post tal como está guardado. El acceso no depende del
    // título, así que ambas configuraciones responden igual.
    let config = EngineConfig { copy_params: false,
                                ..EngineConfig::default() };
    let app = PostsApp::new(Arc::new(PostStore::seeded()), config).expect("app builds");
    let response = call(&app, "update", Seed::new().user(User::new(1)).params(json!({ "id": 2, "title": "Kept" })));
    assert!(response.success);
    assert_eq!(app.store().get(2).map(|p| p.title), Some("Kept".to_string()));
}
