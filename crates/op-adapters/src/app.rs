//! `PostsApp`: todas las operaciones del dominio armadas sobre un mismo
//! store y una misma `EngineConfig`.

use std::sync::Arc;

use log::debug;
use op_core::{Context, EngineConfig, Flow, Hook, HookPhase, Operation, OperationEngine, OperationError, Response, Scope,
              Seed};

use crate::contract::PostContract;
use crate::decorator::PostDecorator;
use crate::model::User;
use crate::operations::{Create, Index, Ping, Show, Update};
use crate::policy::PostPolicy;
use crate::store::PostStore;

pub const API_VERSION_HEADER: &str = "X-Api-Version";
pub const API_VERSION: &str = "1";

/// Nombres aceptados por `PostsApp::call`.
pub const OPERATIONS: [&str; 5] = ["ping", "create", "index", "show", "update"];

pub struct PostsApp {
    store: Arc<PostStore>,
    ping: OperationEngine<Ping>,
    create: OperationEngine<Create>,
    index: OperationEngine<Index>,
    show: OperationEngine<Show>,
    update: OperationEngine<Update>,
}

/// After-hook común: versión de la API en cada respuesta.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiVersion;

impl<O: Operation> Hook<O> for ApiVersion {
    fn name(&self) -> &str {
        "api_version"
    }

    fn phase(&self) -> HookPhase {
        HookPhase::After
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        scope.context_mut()
             .headers_mut()
             .insert(API_VERSION_HEADER.to_string(), API_VERSION.to_string());
        Ok(())
    }
}

fn log_verdict(capability: &'static str) -> impl Fn(&Context<User>, bool) + Send + Sync + 'static {
    move |ctx, ok| debug!("{capability} id={} ok={ok}", ctx.id())
}

impl PostsApp {
    pub fn new(store: Arc<PostStore>, config: EngineConfig) -> Result<Self, OperationError> {
        let ping = OperationEngine::builder(Ping).config(config).hook(ApiVersion).build()?;
        let create = OperationEngine::builder(Create::new(Arc::clone(&store))).config(config)
                                                                            .policy(PostPolicy)
                                                                            .after_authorization(log_verdict("authorize"))
                                                                            .contract(PostContract)
                                                                            .after_validation(log_verdict("validate"))
                                                                            .decorator(PostDecorator)
                                                                            .hook(ApiVersion)
                                                                            .build()?;
        let index = OperationEngine::builder(Index::new(Arc::clone(&store))).config(config)
                                                                          .policy(PostPolicy)
                                                                          .decorator(PostDecorator)
                                                                          .hook(ApiVersion)
                                                                          .build()?;
        let show = OperationEngine::builder(Show::new(Arc::clone(&store))).config(config)
                                                                        .policy(PostPolicy)
                                                                        .decorator(PostDecorator)
                                                                        .hook(ApiVersion)
                                                                        .build()?;
        let update = OperationEngine::builder(Update::new(Arc::clone(&store))).config(config)
                                                                            .policy(PostPolicy)
                                                                            .after_authorization(log_verdict("authorize"))
                                                                            .contract(PostContract)
                                                                            .decorator(PostDecorator)
                                                                            .hook(ApiVersion)
                                                                            .build()?;
        Ok(Self { store,
                  ping,
                  create,
                  index,
                  show,
                  update })
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Invoca la operación `name`. `None` si el nombre no existe.
    pub fn call(&self, name: &str, seed: Seed<User>) -> Option<Result<Response, OperationError>> {
        let result = match name {
            "ping" => self.ping.call(seed),
            "create" => self.create.call(seed),
            "index" => self.index.call(seed),
            "show" => self.show.call(seed),
            "update" => self.update.call(seed),
            _ => return None,
        };
        Some(result)
    }
}
