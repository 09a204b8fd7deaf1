//! Builder de `OperationEngine`.
//!
//! Las capacidades y los hooks se declaran una sola vez aquí; `build`
//! valida la declaración, arma el `HookPipeline` y congela la configuración.
//! Nada de lo construido se muta después.
//!
//! Orden de registro resultante:
//! - before: `resolve_policy`, `resolve_contract`, `resolve_decorator` (los
//!   declarados) y luego los before-hooks del usuario.
//! - after: los after-hooks del usuario, luego `assemble_response` y
//!   `build_link_header` (si `EngineConfig::link_header`).

use std::sync::Arc;

use super::{canonical_identity, Operation, OperationEngine};
use crate::capability::{AuthorizationConfig, Callback, ContractClass, DecorationConfig, DecoratorClass, PolicyClass,
                        ResolveContract, ResolveDecorator, ResolvePolicy, Resolver, ValidationConfig};
use crate::config::EngineConfig;
use crate::errors::OperationError;
use crate::hook::{AssembleResponse, BuildLinkHeader, Hook};
use crate::model::Context;
use crate::pipeline::HookPipeline;

type PolicyResolver<O> = Resolver<dyn PolicyClass<<O as Operation>::User, <O as Operation>::Resource>,
                                  <O as Operation>::User>;
type ContractResolver<O> = Resolver<dyn ContractClass<<O as Operation>::Resource>, <O as Operation>::User>;
type DecoratorResolver<O> = Resolver<dyn DecoratorClass<<O as Operation>::Resource>, <O as Operation>::User>;

/// Configuración inmutable de una operación, compartida por todas sus
/// invocaciones.
pub struct OperationConfig<O: Operation> {
    pub(crate) engine: EngineConfig,
    pub(crate) authorization: Option<AuthorizationConfig<O::User, O::Resource>>,
    pub(crate) validation: Option<ValidationConfig<O::User, O::Resource>>,
    pub(crate) decoration: Option<DecorationConfig<O::User, O::Resource>>,
}

impl<O: Operation> OperationConfig<O> {
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }
}

pub struct EngineBuilder<O: Operation> {
    operation: O,
    engine: EngineConfig,
    policy: Option<PolicyResolver<O>>,
    after_authorization: Option<Callback<O::User>>,
    contract: Option<ContractResolver<O>>,
    after_validation: Option<Callback<O::User>>,
    decorator: Option<DecoratorResolver<O>>,
    hooks: Vec<Arc<dyn Hook<O>>>,
    /// Errores de declaración; se reportan juntos en `build`.
    problems: Vec<String>,
}

impl<O: Operation> EngineBuilder<O> {
    pub fn new(operation: O) -> Self {
        Self { operation,
               engine: EngineConfig::default(),
               policy: None,
               after_authorization: None,
               contract: None,
               after_validation: None,
               decorator: None,
               hooks: Vec::new(),
               problems: Vec::new() }
    }

    pub fn config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    // --- autorización ---

    pub fn policy(self, class: impl PolicyClass<O::User, O::Resource> + 'static) -> Self {
        let class: Arc<dyn PolicyClass<O::User, O::Resource>> = Arc::new(class);
        self.policy_resolver(Resolver::fixed(class))
    }

    /// Policy elegida por invocación; `None` deja la operación sin policy.
    pub fn policy_with<F>(self, f: F) -> Self
        where F: Fn(&Context<O::User>) -> Option<Arc<dyn PolicyClass<O::User, O::Resource>>> + Send + Sync + 'static
    {
        self.policy_resolver(Resolver::computed(f))
    }

    pub fn policy_resolver(mut self, resolver: PolicyResolver<O>) -> Self {
        if self.policy.is_some() {
            self.problems.push("policy declared twice".into());
        }
        self.policy = Some(resolver);
        self
    }

    pub fn after_authorization<F>(mut self, f: F) -> Self
        where F: Fn(&Context<O::User>, bool) + Send + Sync + 'static
    {
        if self.after_authorization.is_some() {
            self.problems.push("after_authorization declared twice".into());
        }
        self.after_authorization = Some(Arc::new(f));
        self
    }

    // --- validación ---

    pub fn contract(self, class: impl ContractClass<O::Resource> + 'static) -> Self {
        let class: Arc<dyn ContractClass<O::Resource>> = Arc::new(class);
        self.contract_resolver(Resolver::fixed(class))
    }

    pub fn contract_with<F>(self, f: F) -> Self
        where F: Fn(&Context<O::User>) -> Option<Arc<dyn ContractClass<O::Resource>>> + Send + Sync + 'static
    {
        self.contract_resolver(Resolver::computed(f))
    }

    pub fn contract_resolver(mut self, resolver: ContractResolver<O>) -> Self {
        if self.contract.is_some() {
            self.problems.push("contract declared twice".into());
        }
        self.contract = Some(resolver);
        self
    }

    pub fn after_validation<F>(mut self, f: F) -> Self
        where F: Fn(&Context<O::User>, bool) + Send + Sync + 'static
    {
        if self.after_validation.is_some() {
            self.problems.push("after_validation declared twice".into());
        }
        self.after_validation = Some(Arc::new(f));
        self
    }

    // --- decoración ---

    pub fn decorator(self, class: impl DecoratorClass<O::Resource> + 'static) -> Self {
        let class: Arc<dyn DecoratorClass<O::Resource>> = Arc::new(class);
        self.decorator_resolver(Resolver::fixed(class))
    }

    pub fn decorator_with<F>(self, f: F) -> Self
        where F: Fn(&Context<O::User>) -> Option<Arc<dyn DecoratorClass<O::Resource>>> + Send + Sync + 'static
    {
        self.decorator_resolver(Resolver::computed(f))
    }

    pub fn decorator_resolver(mut self, resolver: DecoratorResolver<O>) -> Self {
        if self.decorator.is_some() {
            self.problems.push("decorator declared twice".into());
        }
        self.decorator = Some(resolver);
        self
    }

    // --- hooks ---

    pub fn hook(self, hook: impl Hook<O> + 'static) -> Self {
        self.shared_hook(Arc::new(hook))
    }

    pub fn shared_hook(mut self, hook: Arc<dyn Hook<O>>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn build(self) -> Result<OperationEngine<O>, OperationError> {
        let mut problems = self.problems;
        if self.after_authorization.is_some() && self.policy.is_none() {
            problems.push("after_authorization declared without a policy".into());
        }
        if self.after_validation.is_some() && self.contract.is_none() {
            problems.push("after_validation declared without a contract".into());
        }

        let mut hooks: Vec<Arc<dyn Hook<O>>> = Vec::new();
        if self.policy.is_some() {
            hooks.push(Arc::new(ResolvePolicy));
        }
        if self.contract.is_some() {
            hooks.push(Arc::new(ResolveContract));
        }
        if self.decorator.is_some() {
            hooks.push(Arc::new(ResolveDecorator));
        }
        hooks.extend(self.hooks);
        // Cierran la fase after: ven el status y los links definitivos.
        hooks.push(Arc::new(AssembleResponse));
        if self.engine.link_header {
            hooks.push(Arc::new(BuildLinkHeader));
        }

        let mut pipeline = HookPipeline::new();
        for hook in hooks {
            pipeline.register(hook);
        }

        let action = canonical_identity(self.operation.name());
        if !problems.is_empty() {
            return Err(OperationError::Misconfigured(format!("{action}: {}", problems.join("; "))));
        }

        let config = OperationConfig { engine: self.engine,
                                       authorization: self.policy
                                                          .map(|r| AuthorizationConfig::new(r, self.after_authorization)),
                                       validation: self.contract
                                                       .map(|r| ValidationConfig::new(r, self.after_validation)),
                                       decoration: self.decorator.map(DecorationConfig::new) };
        Ok(OperationEngine::from_parts(self.operation, config, pipeline, action))
    }
}
