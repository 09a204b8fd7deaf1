use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::Resolver;
use crate::errors::OperationError;
use crate::flow::Flow;
use crate::hook::{Hook, HookPhase};
use crate::operation::Operation;
use crate::pipeline::Scope;

/// Representación de salida de un recurso.
pub trait DecoratorClass<R>: Send + Sync {
    fn represent(&self, resource: &R) -> Value;

    fn represent_collection(&self, resources: &[R]) -> Value {
        Value::Array(resources.iter().map(|r| self.represent(r)).collect())
    }
}

/// Resultado de `decorate`: el valor original si no hay decorator, o su
/// representación.
#[derive(Debug, Clone, PartialEq)]
pub enum Decorated<T> {
    Plain(T),
    Represented(Value),
}

impl<T> Decorated<T> {
    pub fn is_represented(&self) -> bool {
        matches!(self, Decorated::Represented(_))
    }

    pub fn represented(&self) -> Option<&Value> {
        match self {
            Decorated::Represented(value) => Some(value),
            Decorated::Plain(_) => None,
        }
    }
}

impl<T: Serialize> Decorated<T> {
    /// Valor listo para usar como payload.
    pub fn into_value(self) -> Result<Value, OperationError> {
        match self {
            Decorated::Represented(value) => Ok(value),
            Decorated::Plain(plain) => Ok(serde_json::to_value(plain)?),
        }
    }
}

pub struct DecorationConfig<U, R> {
    pub(crate) resolver: Resolver<dyn DecoratorClass<R>, U>,
}

impl<U, R> DecorationConfig<U, R> {
    pub(crate) fn new(resolver: Resolver<dyn DecoratorClass<R>, U>) -> Self {
        Self { resolver }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveDecorator;

impl<O: Operation> Hook<O> for ResolveDecorator {
    fn name(&self) -> &str {
        "resolve_decorator"
    }

    fn phase(&self) -> HookPhase {
        HookPhase::Before
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        let _ = scope.decorator_class();
        Ok(())
    }
}

fn missing_decorator(action: &str) -> OperationError {
    OperationError::Misconfigured(format!("no decorator resolved for {action}"))
}

impl<'a, O: Operation> Scope<'a, O> {
    pub(crate) fn decorator_class(&mut self) -> Option<Arc<dyn DecoratorClass<O::Resource>>> {
        let resolver = self.config.decoration.as_ref().map(|d| &d.resolver);
        self.resolved.decorator.get_or_resolve(resolver, &self.context)
    }

    pub fn build_decorator(&mut self, resource: &O::Resource) -> Result<Value, OperationError> {
        let class = self.decorator_class().ok_or_else(|| missing_decorator(self.action))?;
        Ok(class.represent(resource))
    }

    pub fn build_collection_decorator(&mut self,
                                      resources: impl IntoIterator<Item = O::Resource>)
                                      -> Result<Value, OperationError> {
        let class = self.decorator_class().ok_or_else(|| missing_decorator(self.action))?;
        let items: Vec<O::Resource> = resources.into_iter().collect();
        Ok(class.represent_collection(&items))
    }

    pub fn decorate(&mut self, resource: O::Resource) -> Decorated<O::Resource> {
        match self.decorator_class() {
            Some(class) => Decorated::Represented(class.represent(&resource)),
            None => Decorated::Plain(resource),
        }
    }

    pub fn decorate_collection(&mut self,
                               resources: impl IntoIterator<Item = O::Resource>)
                               -> Decorated<Vec<O::Resource>> {
        let items: Vec<O::Resource> = resources.into_iter().collect();
        match self.decorator_class() {
            Some(class) => Decorated::Represented(class.represent_collection(&items)),
            None => Decorated::Plain(items),
        }
    }
}
