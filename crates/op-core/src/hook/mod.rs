//! Hooks del pipeline.
//!
//! Un hook se registra en una fase:
//! - `Before`: antes de la lógica de negocio, en orden de registro.
//! - `After`: siempre, exactamente una vez, también tras `Halt` o fallo.
//!
//! La fase around no es registrable: es el límite de `Halt` del propio
//! pipeline. El core cierra la fase after con `AssembleResponse` y, si está
//! habilitado, `BuildLinkHeader`; las capacidades aportan sus before-hooks.

mod assemble;
mod links;

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::flow::Flow;
use crate::operation::Operation;
use crate::pipeline::Scope;

pub use assemble::{assemble, AssembleResponse};
pub use links::{build_link_header, BuildLinkHeader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HookPhase::Before => "before",
            HookPhase::After => "after",
        };
        f.write_str(s)
    }
}

/// Paso registrado en el pipeline de una operación.
pub trait Hook<O: Operation>: Send + Sync {
    /// Identificador estable (aparece en logs y en el journal).
    fn name(&self) -> &str;

    fn phase(&self) -> HookPhase;

    /// Un `Err(Interrupt::Halt)` en fase before salta directamente a la
    /// fase after. En fase after no hay nada que saltar y se ignora.
    fn run(&self, scope: &mut Scope<'_, O>) -> Flow;
}

/// Adaptador para registrar closures como hooks.
pub struct FnHook<O, F> {
    name: String,
    phase: HookPhase,
    f: F,
    _op: PhantomData<fn(O)>,
}

impl<O, F> FnHook<O, F> where O: Operation
{
    pub fn new(name: impl Into<String>, phase: HookPhase, f: F) -> Self
        where F: Fn(&mut Scope<'_, O>) -> Flow + Send + Sync
    {
        Self { name: name.into(),
               phase,
               f,
               _op: PhantomData }
    }

    pub fn before(name: impl Into<String>, f: F) -> Self
        where F: Fn(&mut Scope<'_, O>) -> Flow + Send + Sync
    {
        Self::new(name, HookPhase::Before, f)
    }

    pub fn after(name: impl Into<String>, f: F) -> Self
        where F: Fn(&mut Scope<'_, O>) -> Flow + Send + Sync
    {
        Self::new(name, HookPhase::After, f)
    }
}

impl<O, F> Hook<O> for FnHook<O, F>
    where O: Operation,
          F: Fn(&mut Scope<'_, O>) -> Flow + Send + Sync
{
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> HookPhase {
        self.phase
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        (self.f)(scope)
    }
}

impl<O, F> fmt::Debug for FnHook<O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook")
         .field("name", &self.name)
         .field("phase", &self.phase)
         .finish()
    }
}
