//! Capacidades opcionales: autorización, validación y decoración.
//!
//! Cada capacidad se declara en el `EngineBuilder` con un `Resolver` (valor
//! fijo o función del contexto). Al declararse, añade al pipeline un
//! before-hook que resuelve el colaborador una vez por invocación; los
//! métodos de `Scope` reutilizan esa resolución.

mod authorization;
mod decoration;
mod validation;

use std::sync::Arc;

use crate::model::Context;
use crate::operation::Operation;

pub use authorization::{Authorizable, AuthorizationConfig, Authorized, Policy, PolicyClass, ResolvePolicy};
pub use decoration::{Decorated, DecorationConfig, DecoratorClass, ResolveDecorator};
pub use validation::{Contract, ContractClass, ResolveContract, Validatable, Validated, ValidationConfig};

/// Callback posterior a `authorize`/`validate`; recibe el resultado booleano.
pub type Callback<U> = Arc<dyn Fn(&Context<U>, bool) + Send + Sync>;

/// Colaborador fijo o calculado a partir del contexto. `Computed` puede
/// devolver `None` para saltar la capacidad en esa invocación.
pub enum Resolver<T: ?Sized, U> {
    Fixed(Arc<T>),
    Computed(Arc<dyn Fn(&Context<U>) -> Option<Arc<T>> + Send + Sync>),
}

impl<T: ?Sized, U> Resolver<T, U> {
    pub fn fixed(value: Arc<T>) -> Self {
        Resolver::Fixed(value)
    }

    pub fn computed(f: impl Fn(&Context<U>) -> Option<Arc<T>> + Send + Sync + 'static) -> Self {
        Resolver::Computed(Arc::new(f))
    }

    pub fn resolve(&self, ctx: &Context<U>) -> Option<Arc<T>> {
        match self {
            Resolver::Fixed(value) => Some(Arc::clone(value)),
            Resolver::Computed(f) => f(ctx),
        }
    }
}

impl<T: ?Sized, U> Clone for Resolver<T, U> {
    fn clone(&self) -> Self {
        match self {
            Resolver::Fixed(value) => Resolver::Fixed(Arc::clone(value)),
            Resolver::Computed(f) => Resolver::Computed(Arc::clone(f)),
        }
    }
}

pub(crate) enum Resolution<T: ?Sized> {
    Pending,
    Resolved(Option<Arc<T>>),
}

impl<T: ?Sized> Resolution<T> {
    /// Resuelve como mucho una vez por invocación.
    pub(crate) fn get_or_resolve<U>(&mut self, resolver: Option<&Resolver<T, U>>, ctx: &Context<U>) -> Option<Arc<T>> {
        if let Resolution::Resolved(resolved) = self {
            return resolved.clone();
        }
        let resolved = resolver.and_then(|r| r.resolve(ctx));
        *self = Resolution::Resolved(resolved.clone());
        resolved
    }
}

/// Colaboradores resueltos para la invocación en curso.
pub(crate) struct Resolutions<O: Operation> {
    pub(crate) policy: Resolution<dyn PolicyClass<O::User, O::Resource>>,
    pub(crate) contract: Resolution<dyn ContractClass<O::Resource>>,
    pub(crate) decorator: Resolution<dyn DecoratorClass<O::Resource>>,
}

impl<O: Operation> Default for Resolutions<O> {
    fn default() -> Self {
        Self { policy: Resolution::Pending,
               contract: Resolution::Pending,
               decorator: Resolution::Pending }
    }
}
