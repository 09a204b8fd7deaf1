//! Validación: contratos construidos a partir de un recurso.

use std::sync::Arc;

use log::debug;

use super::{Callback, Resolver};
use crate::constants::{CONTRACT_ERROR_MESSAGE, CONTRACT_ERROR_TYPE};
use crate::event::LifecycleEventKind;
use crate::flow::Flow;
use crate::hook::{Hook, HookPhase};
use crate::model::{ErrorPayload, Params, Resource, Respond, ValidationErrors};
use crate::operation::Operation;
use crate::pipeline::Scope;
use crate::status::names;

pub trait ContractClass<R>: Send + Sync {
    fn build(&self, resource: R) -> Box<dyn Contract<R>>;
}

/// Contrato ligado a un recurso. `errors` sólo es significativo tras un
/// `validate` fallido.
pub trait Contract<R> {
    fn validate(&mut self, params: &Params) -> bool;

    fn errors(&self) -> ValidationErrors;

    fn resource(&self) -> &R;

    fn into_resource(self: Box<Self>) -> R;
}

pub enum Validatable<R> {
    Resource(R),
    Contract(Box<dyn Contract<R>>),
}

impl<R> Validatable<R> {
    pub fn is_contract(&self) -> bool {
        matches!(self, Validatable::Contract(_))
    }

    pub fn resource(&self) -> &R {
        match self {
            Validatable::Resource(resource) => resource,
            Validatable::Contract(contract) => contract.resource(),
        }
    }

    pub fn into_resource(self) -> R {
        match self {
            Validatable::Resource(resource) => resource,
            Validatable::Contract(contract) => contract.into_resource(),
        }
    }
}

impl<R: Resource> Validatable<R> {
    pub fn errors(&self) -> ValidationErrors {
        match self {
            Validatable::Resource(resource) => resource.errors(),
            Validatable::Contract(contract) => contract.errors(),
        }
    }
}

impl<R> From<R> for Validatable<R> {
    fn from(resource: R) -> Self {
        Validatable::Resource(resource)
    }
}

pub struct Validated<R> {
    valid: bool,
    subject: Validatable<R>,
}

impl<R> Validated<R> {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn subject(&self) -> &Validatable<R> {
        &self.subject
    }

    pub fn into_subject(self) -> Validatable<R> {
        self.subject
    }

    pub fn into_resource(self) -> R {
        self.subject.into_resource()
    }
}

pub struct ValidationConfig<U, R> {
    pub(crate) resolver: Resolver<dyn ContractClass<R>, U>,
    pub(crate) after: Option<Callback<U>>,
}

impl<U, R> ValidationConfig<U, R> {
    pub(crate) fn new(resolver: Resolver<dyn ContractClass<R>, U>, after: Option<Callback<U>>) -> Self {
        Self { resolver, after }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveContract;

impl<O: Operation> Hook<O> for ResolveContract {
    fn name(&self) -> &str {
        "resolve_contract"
    }

    fn phase(&self) -> HookPhase {
        HookPhase::Before
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        let _ = scope.contract_class();
        Ok(())
    }
}

fn validation_errors_response(errors: &ValidationErrors) -> Respond {
    let payload = ErrorPayload::new(CONTRACT_ERROR_TYPE, CONTRACT_ERROR_MESSAGE).with_errors(errors);
    Respond::new().status(names::UNPROCESSABLE_ENTITY).payload(payload)
}

impl<'a, O: Operation> Scope<'a, O> {
    pub(crate) fn contract_class(&mut self) -> Option<Arc<dyn ContractClass<O::Resource>>> {
        let resolver = self.config.validation.as_ref().map(|v| &v.resolver);
        self.resolved.contract.get_or_resolve(resolver, &self.context)
    }

    /// Contrato para `resource`; sin contrato configurado devuelve el recurso.
    pub fn build_contract(&mut self, resource: O::Resource) -> Validatable<O::Resource> {
        match self.contract_class() {
            Some(class) => Validatable::Contract(class.build(resource)),
            None => Validatable::Resource(resource),
        }
    }

    /// Valida con el contrato (contra los params de la invocación) o, sin
    /// contrato, con la validación propia del recurso. Default: válido.
    pub fn validate(&mut self, subject: impl Into<Validatable<O::Resource>>) -> Validated<O::Resource> {
        let mut subject = match subject.into() {
            Validatable::Resource(resource) => self.build_contract(resource),
            contract => contract,
        };

        let valid = match &mut subject {
            Validatable::Contract(contract) => contract.validate(self.context.params()),
            Validatable::Resource(resource) => resource.validate().unwrap_or(true),
        };

        debug!("validate id={} valid={valid}", self.context.id());
        self.context.record(LifecycleEventKind::Validated { valid });
        if let Some(after) = self.config.validation.as_ref().and_then(|v| v.after.as_ref()) {
            after(&self.context, valid);
        }

        Validated { valid, subject }
    }

    /// Como `validate`, pero responde 422 con los errores y detiene la
    /// ejecución si no es válido.
    pub fn validate_or_halt(&mut self,
                            subject: impl Into<Validatable<O::Resource>>)
                            -> Flow<Validatable<O::Resource>> {
        let verdict = self.validate(subject);
        if verdict.valid {
            return Ok(verdict.subject);
        }
        self.respond_with_validation_errors_and_halt(&verdict.subject)
    }

    /// Respuesta 422 con `meta.errors`; no detiene la ejecución.
    pub fn respond_with_validation_errors(&mut self, subject: &Validatable<O::Resource>) {
        let respond = validation_errors_response(&subject.errors());
        self.respond_with(respond);
    }

    pub fn respond_with_validation_errors_and_halt<T>(&mut self, subject: &Validatable<O::Resource>) -> Flow<T> {
        self.respond_with_validation_errors(subject);
        self.halt()
    }
}
