use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Headers, Links, Params, Respond};
use crate::event::{LifecycleEvent, LifecycleEventKind};
use crate::status::Status;

/// Estado mutable de una única invocación.
///
/// Se crea una vez por invocación a partir de un `Seed`, lo mutan la lógica
/// de negocio y los hooks (siempre en secuencia) y el caller lo recibe ya
/// terminado envuelto en `Completed`.
#[derive(Debug)]
pub struct Context<U> {
    id: Uuid,
    params: Params,
    current_user: Option<Arc<U>>,
    status: Option<Status>,
    payload: Option<Value>,
    headers: Headers,
    links: Links,
    failed: bool,
    extras: Map<String, Value>,
    journal: Vec<LifecycleEvent>,
}

impl<U> Context<U> {
    /// Identificador de la invocación (se usa en logs y en el journal).
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn current_user(&self) -> Option<&U> {
        self.current_user.as_deref()
    }

    pub fn current_user_arc(&self) -> Option<Arc<U>> {
        self.current_user.clone()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: impl Into<Status>) {
        self.status = Some(status.into());
    }

    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn set_payload(&mut self, payload: impl Into<Value>) {
        self.payload = Some(payload.into());
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    /// Sólo es significativo después de `AssembleResponse`.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub(crate) fn mark_failed(&mut self, failed: bool) {
        self.failed = failed;
    }

    /// Campos semilla adicionales (p.ej. versión de API) que los resolvers
    /// pueden consultar.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    pub fn journal(&self) -> &[LifecycleEvent] {
        &self.journal
    }

    /// Fusiona en el contexto cada campo presente de `respond`; no detiene la
    /// ejecución. La última escritura por campo gana.
    pub fn apply(&mut self, respond: Respond) {
        let (status, payload, headers, links) = respond.into_parts();
        if let Some(status) = status {
            self.status = Some(status);
        }
        if let Some(payload) = payload {
            self.payload = Some(payload);
        }
        self.headers.extend(headers);
        self.links.extend(links);
    }

    pub(crate) fn record(&mut self, kind: LifecycleEventKind) {
        let ev = LifecycleEvent { seq: self.journal.len() as u64,
                                  invocation_id: self.id,
                                  kind,
                                  ts: Utc::now() };
        self.journal.push(ev);
    }
}

/// Campos iniciales de una invocación.
#[derive(Debug)]
pub struct Seed<U> {
    params: Params,
    current_user: Option<Arc<U>>,
    headers: Headers,
    extras: Map<String, Value>,
}

impl<U> Seed<U> {
    pub fn new() -> Self {
        Self { params: Params::new(),
               current_user: None,
               headers: Headers::new(),
               extras: Map::new() }
    }

    /// Reemplaza los parámetros. Un valor que no sea objeto deja el mapa vacío.
    pub fn params(mut self, params: Value) -> Self {
        self.params = match params {
            Value::Object(map) => map,
            _ => Params::new(),
        };
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn user(self, user: U) -> Self {
        self.shared_user(Arc::new(user))
    }

    pub fn shared_user(mut self, user: Arc<U>) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn into_context(self) -> Context<U> {
        Context { id: Uuid::new_v4(),
                  params: self.params,
                  current_user: self.current_user,
                  status: None,
                  payload: None,
                  headers: self.headers,
                  links: Links::new(),
                  failed: false,
                  extras: self.extras,
                  journal: Vec::new() }
    }
}

impl<U> Default for Seed<U> {
    fn default() -> Self {
        Self::new()
    }
}
