use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use op_core::constants::{FORBIDDEN_ERROR_TYPE, FORBIDDEN_OPERATION_MESSAGE};
use op_core::{EngineConfig, Flow, LifecycleEventKind, Operation, OperationEngine, OperationError, Policy, PolicyClass,
              Resource, Respond, Scope, Seed};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
struct Doc {
    owner: u32,
    title: String,
}

impl Resource for Doc {
    fn assign(&mut self, name: &str, value: &Value) -> bool {
        match (name, value.as_str()) {
            ("title", Some(title)) => {
                self.title = title.to_string();
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Account {
    id: u32,
    admin: bool,
}

struct DocPolicy;

struct BoundDocPolicy {
    user: Option<Arc<Account>>,
    doc: Doc,
}

impl Policy<Account, Doc> for BoundDocPolicy {
    fn user(&self) -> Option<&Account> {
        self.user.as_deref()
    }

    fn resource(&self) -> &Doc {
        &self.doc
    }

    fn resource_mut(&mut self) -> &mut Doc {
        &mut self.doc
    }

    fn into_resource(self: Box<Self>) -> Doc {
        self.doc
    }

    fn permits(&self, action: &str) -> bool {
        let owns = self.user
                       .as_ref()
                       .is_some_and(|u| u.admin || u.id == self.doc.owner);
        match action {
            "edit" => owns && !self.doc.title.contains("locked"),
            "list" => self.user.is_some(),
            _ => false,
        }
    }
}

impl PolicyClass<Account, Doc> for DocPolicy {
    fn build(&self, user: Option<Arc<Account>>, resource: Doc) -> Box<dyn Policy<Account, Doc>> {
        Box::new(BoundDocPolicy { user, doc: resource })
    }

    fn accessible_by(&self, user: Option<&Account>, scope: Vec<Doc>) -> Vec<Doc> {
        match user {
            Some(u) if u.admin => scope,
            Some(u) => scope.into_iter().filter(|d| d.owner == u.id).collect(),
            None => Vec::new(),
        }
    }
}

struct Edit;

impl Operation for Edit {
    type User = Account;
    type Resource = Doc;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let doc = Doc { owner: 1,
                        title: "draft".into() };
        let doc = scope.authorize_or_halt(doc)?.into_resource();
        scope.respond_with(Respond::new().payload(json!({ "title": doc.title })));
        Ok(())
    }
}

struct List;

impl Operation for List {
    type User = Account;
    type Resource = Doc;

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let docs = vec![Doc { owner: 1,
                              title: "a".into() },
                        Doc { owner: 2,
                              title: "b".into() },
                        Doc { owner: 1,
                              title: "c".into() }];
        let visible: Vec<String> = scope.authorize_collection(docs).into_iter().map(|d| d.title).collect();
        scope.respond_with(Respond::new().payload(json!(visible)));
        Ok(())
    }
}

/// Construye la policy antes de autorizar; `authorize` debe reutilizarla.
struct EditPrebuilt;

impl Operation for EditPrebuilt {
    type User = Account;
    type Resource = Doc;

    fn name(&self) -> &str {
        "Edit"
    }

    fn call(&self, scope: &mut Scope<'_, Self>) -> Flow {
        let policy = scope.build_policy(Doc { owner: 1,
                                              title: "draft".into() });
        let prebuilt = policy.is_policy();
        let verdict = scope.authorize(policy);
        let allowed = verdict.is_allowed();
        let doc = verdict.into_resource();
        scope.respond_with(Respond::new().payload(json!({ "prebuilt": prebuilt, "allowed": allowed, "title": doc.title })));
        Ok(())
    }
}

struct CountingPolicy {
    builds: Arc<AtomicUsize>,
}

impl PolicyClass<Account, Doc> for CountingPolicy {
    fn build(&self, user: Option<Arc<Account>>, resource: Doc) -> Box<dyn Policy<Account, Doc>> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        DocPolicy.build(user, resource)
    }
}

fn owner() -> Account {
    Account { id: 1, admin: false }
}

fn stranger() -> Account {
    Account { id: 9, admin: false }
}

fn guarded() -> OperationEngine<Edit> {
    OperationEngine::builder(Edit).policy(DocPolicy).build().expect("engine builds")
}

#[test]
fn allowed_user_reaches_the_body() {
    let response = guarded().call(Seed::new().user(owner())).expect("invoke");
    assert!(response.success);
    assert_eq!(response.status, "ok");
    assert_eq!(response.payload, Some(json!({ "title": "draft" })));
}

#[test]
fn denied_user_gets_forbidden_and_halts() {
    let response = guarded().call(Seed::new().user(stranger())).expect("invoke");
    assert!(!response.success);
    assert_eq!(response.code, 403);
    assert_eq!(response.status, "forbidden");
    assert_eq!(response.payload,
               Some(json!({ "error_type": FORBIDDEN_ERROR_TYPE, "error_message": FORBIDDEN_OPERATION_MESSAGE })));
}

#[test]
fn missing_user_is_denied() {
    let response = guarded().call(Seed::new()).expect("invoke");
    assert_eq!(response.code, 403);
}

#[test]
fn params_are_copied_onto_the_policy_resource() {
    let response = guarded().call(Seed::new().user(owner()).params(json!({ "title": "renamed", "unknown": 1 })))
                            .expect("invoke");
    assert_eq!(response.payload, Some(json!({ "title": "renamed" })));

    let locked = guarded().call(Seed::new().user(owner()).param("title", "locked"))
                          .expect("invoke");
    assert_eq!(locked.code, 403);
}

#[test]
fn param_copying_can_be_disabled() {
    let config = EngineConfig { copy_params: false,
                                ..EngineConfig::default() };
    let engine = OperationEngine::builder(Edit).config(config)
                                               .policy(DocPolicy)
                                               .build()
                                               .expect("engine builds");
    let response = engine.call(Seed::new().user(owner()).param("title", "locked"))
                         .expect("invoke");
    assert!(response.success);
    assert_eq!(response.payload, Some(json!({ "title": "draft" })));
}

#[test]
fn no_policy_means_authorized() {
    let engine = OperationEngine::new(Edit).expect("engine builds");
    let response = engine.call(Seed::new()).expect("invoke");
    assert!(response.success);
}

#[test]
fn verdict_is_journaled_and_reported_to_the_callback() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let engine = OperationEngine::builder(Edit).policy(DocPolicy)
                                               .after_authorization(move |_ctx, allowed| {
                                                   sink.lock().expect("lock").push(allowed)
                                               })
                                               .build()
                                               .expect("engine builds");
    let done = engine.invoke(Seed::new().user(stranger())).expect("invoke");
    assert_eq!(*seen.lock().expect("lock"), vec![false]);
    assert!(done.journal().iter().any(|ev| {
                                        ev.kind
                                        == LifecycleEventKind::Authorized { action: "edit".into(),
                                                                            allowed: false }
                                    }));
}

#[test]
fn computed_policy_resolves_once_per_invocation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let class: Arc<dyn PolicyClass<Account, Doc>> = Arc::new(DocPolicy);
    let engine = OperationEngine::builder(Edit).policy_with(move |ctx| {
                                                   counter.fetch_add(1, Ordering::SeqCst);
                                                   ctx.current_user().map(|_| Arc::clone(&class))
                                               })
                                               .build()
                                               .expect("engine builds");

    assert_eq!(engine.pipeline().before_hooks(), vec!["resolve_policy"]);
    let response = engine.call(Seed::new().user(stranger())).expect("invoke");
    assert_eq!(response.code, 403);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Sin usuario el resolver no devuelve policy: la operación queda abierta.
    let response = engine.call(Seed::new()).expect("invoke");
    assert!(response.success);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn collections_are_scoped_by_the_policy() {
    let engine = OperationEngine::builder(List).policy(DocPolicy).build().expect("engine builds");
    let mine = engine.call(Seed::new().user(owner())).expect("invoke");
    assert_eq!(mine.payload, Some(json!(["a", "c"])));

    let all = engine.call(Seed::new().user(Account { id: 5, admin: true }))
                    .expect("invoke");
    assert_eq!(all.payload, Some(json!(["a", "b", "c"])));

    let unscoped = OperationEngine::new(List).expect("engine builds")
                                             .call(Seed::new())
                                             .expect("invoke");
    assert_eq!(unscoped.payload, Some(json!(["a", "b", "c"])));
}

#[test]
fn declaration_mistakes_fail_at_build() {
    let twice = OperationEngine::builder(Edit).policy(DocPolicy).policy(DocPolicy).build();
    assert!(matches!(twice, Err(OperationError::Misconfigured(ref msg)) if msg.contains("policy declared twice")));

    let orphan = OperationEngine::builder(Edit).after_authorization(|_, _| {}).build();
    assert!(matches!(orphan, Err(OperationError::Misconfigured(ref msg)) if msg.contains("without a policy")));
}

#[test]
fn a_prebuilt_policy_is_reused_and_still_receives_params() {
    let builds = Arc::new(AtomicUsize::new(0));
    let engine = OperationEngine::builder(EditPrebuilt).policy(CountingPolicy { builds: Arc::clone(&builds) })
                                                       .build()
                                                       .expect("engine builds");
    let response = engine.call(Seed::new().user(owner()).param("title", "renamed"))
                         .expect("invoke");
    assert_eq!(response.payload,
               Some(json!({ "prebuilt": true, "allowed": true, "title": "renamed" })));
    assert_eq!(builds.load(Ordering::SeqCst), 1);

    // El título copiado se evalúa sobre la policy ya construida.
    let locked = engine.call(Seed::new().user(owner()).param("title", "locked"))
                       .expect("invoke");
    assert_eq!(locked.payload,
               Some(json!({ "prebuilt": true, "allowed": false, "title": "locked" })));
    assert_eq!(builds.load(Ordering::SeqCst), 2);
}

#[test]
fn without_a_policy_build_policy_returns_the_resource() {
    let response = OperationEngine::new(EditPrebuilt).expect("engine builds")
                                                     .call(Seed::new())
                                                     .expect("invoke");
    assert_eq!(response.payload,
               Some(json!({ "prebuilt": false, "allowed": true, "title": "draft" })));
}
