//! Autorización: policies construidas para `(usuario, recurso)`.

use std::sync::Arc;

use log::debug;

use super::{Callback, Resolver};
use crate::constants::{FORBIDDEN_ERROR_TYPE, FORBIDDEN_OPERATION_MESSAGE};
use crate::event::LifecycleEventKind;
use crate::flow::Flow;
use crate::hook::{Hook, HookPhase};
use crate::model::{ErrorPayload, Resource, Respond};
use crate::operation::Operation;
use crate::pipeline::Scope;
use crate::status::names;

/// Nivel "tipo" de una policy: sabe construir instancias y filtrar
/// colecciones.
pub trait PolicyClass<U, R>: Send + Sync {
    fn build(&self, user: Option<Arc<U>>, resource: R) -> Box<dyn Policy<U, R>>;

    /// Subconjunto de `scope` accesible para `user`. Por defecto nada es
    /// accesible.
    fn accessible_by(&self, _user: Option<&U>, _scope: Vec<R>) -> Vec<R> {
        Vec::new()
    }
}

/// Instancia de policy ligada a un usuario y un recurso.
pub trait Policy<U, R> {
    fn user(&self) -> Option<&U>;

    fn resource(&self) -> &R;

    fn resource_mut(&mut self) -> &mut R;

    fn into_resource(self: Box<Self>) -> R;

    /// Predicado para la acción canónica de la operación (`create` equivale
    /// a `create?`).
    fn permits(&self, action: &str) -> bool;
}

/// Recurso todavía sin policy, o policy ya construida (se reutiliza).
pub enum Authorizable<U, R> {
    Resource(R),
    Policy(Box<dyn Policy<U, R>>),
}

impl<U, R> Authorizable<U, R> {
    pub fn is_policy(&self) -> bool {
        matches!(self, Authorizable::Policy(_))
    }

    pub fn resource(&self) -> &R {
        match self {
            Authorizable::Resource(resource) => resource,
            Authorizable::Policy(policy) => policy.resource(),
        }
    }

    pub fn into_resource(self) -> R {
        match self {
            Authorizable::Resource(resource) => resource,
            Authorizable::Policy(policy) => policy.into_resource(),
        }
    }
}

impl<U, R> From<R> for Authorizable<U, R> {
    fn from(resource: R) -> Self {
        Authorizable::Resource(resource)
    }
}

/// Resultado de `authorize`: el booleano y el sujeto (ya como policy si había
/// una configurada).
pub struct Authorized<U, R> {
    allowed: bool,
    subject: Authorizable<U, R>,
}

impl<U, R> Authorized<U, R> {
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn subject(&self) -> &Authorizable<U, R> {
        &self.subject
    }

    pub fn into_subject(self) -> Authorizable<U, R> {
        self.subject
    }

    pub fn into_resource(self) -> R {
        self.subject.into_resource()
    }
}

pub struct AuthorizationConfig<U, R> {
    pub(crate) resolver: Resolver<dyn PolicyClass<U, R>, U>,
    pub(crate) after: Option<Callback<U>>,
}

impl<U, R> AuthorizationConfig<U, R> {
    pub(crate) fn new(resolver: Resolver<dyn PolicyClass<U, R>, U>, after: Option<Callback<U>>) -> Self {
        Self { resolver, after }
    }
}

/// Before-hook que resuelve la policy al inicio de la invocación.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvePolicy;

impl<O: Operation> Hook<O> for ResolvePolicy {
    fn name(&self) -> &str {
        "resolve_policy"
    }

    fn phase(&self) -> HookPhase {
        HookPhase::Before
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        let _ = scope.policy_class();
        Ok(())
    }
}

impl<'a, O: Operation> Scope<'a, O> {
    pub(crate) fn policy_class(&mut self) -> Option<Arc<dyn PolicyClass<O::User, O::Resource>>> {
        let resolver = self.config.authorization.as_ref().map(|a| &a.resolver);
        self.resolved.policy.get_or_resolve(resolver, &self.context)
    }

    /// Policy para el usuario actual y `resource`; sin policy configurada
    /// devuelve el recurso tal cual (autorizado automáticamente).
    pub fn build_policy(&mut self, resource: O::Resource) -> Authorizable<O::User, O::Resource> {
        match self.policy_class() {
            Some(class) => Authorizable::Policy(class.build(self.context.current_user_arc(), resource)),
            None => Authorizable::Resource(resource),
        }
    }

    pub fn authorize(&mut self,
                     subject: impl Into<Authorizable<O::User, O::Resource>>)
                     -> Authorized<O::User, O::Resource> {
        let subject = subject.into();
        let Some(class) = self.policy_class() else {
            return Authorized { allowed: true, subject };
        };

        let mut policy = match subject {
            Authorizable::Policy(policy) => policy,
            Authorizable::Resource(resource) => class.build(self.context.current_user_arc(), resource),
        };

        if self.config.engine().copy_params {
            for (name, value) in self.context.params() {
                policy.resource_mut().assign(name, value);
            }
        }

        let allowed = policy.permits(self.action);
        debug!("authorize id={} predicate={}? allowed={allowed}", self.context.id(), self.action);
        self.context.record(LifecycleEventKind::Authorized { action: self.action.to_string(),
                                                             allowed });
        if let Some(after) = self.config.authorization.as_ref().and_then(|a| a.after.as_ref()) {
            after(&self.context, allowed);
        }

        Authorized { allowed,
                     subject: Authorizable::Policy(policy) }
    }

    /// Como `authorize`, pero responde 403 y detiene la ejecución si el
    /// usuario no está autorizado.
    pub fn authorize_or_halt(&mut self,
                             subject: impl Into<Authorizable<O::User, O::Resource>>)
                             -> Flow<Authorizable<O::User, O::Resource>> {
        let verdict = self.authorize(subject);
        if verdict.allowed {
            return Ok(verdict.subject);
        }
        let payload = ErrorPayload::new(FORBIDDEN_ERROR_TYPE, FORBIDDEN_OPERATION_MESSAGE);
        self.respond_and_halt(Respond::new().status(names::FORBIDDEN).payload(payload))
    }

    /// Filtra `collection` con el scoping de la policy; sin policy la
    /// devuelve intacta.
    pub fn authorize_collection(&mut self, collection: impl IntoIterator<Item = O::Resource>) -> Vec<O::Resource> {
        let items: Vec<O::Resource> = collection.into_iter().collect();
        match self.policy_class() {
            Some(class) => class.accessible_by(self.context.current_user(), items),
            None => items,
        }
    }
}
