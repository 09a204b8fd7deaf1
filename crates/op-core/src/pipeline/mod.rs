//! `HookPipeline`: ejecución en tres fases de una invocación.
//!
//! Orden fijo:
//! 1. around (límite de `Halt`): before-hooks en orden de registro y luego
//!    `Operation::call`. Un `Halt` absorbe el resto de la región; un fallo
//!    se guarda para propagarlo.
//! 2. after-hooks en orden de registro, exactamente una vez por invocación,
//!    aunque alguno de ellos falle.
//! 3. Si hubo fallo en la región, resurge ahora.

mod scope;

use std::sync::Arc;

use log::{debug, warn};

use crate::errors::OperationError;
use crate::event::LifecycleEventKind;
use crate::flow::{Flow, Interrupt};
use crate::hook::{Hook, HookPhase};
use crate::operation::Operation;

pub use scope::Scope;

pub struct HookPipeline<O: Operation> {
    before: Vec<Arc<dyn Hook<O>>>,
    after: Vec<Arc<dyn Hook<O>>>,
}

impl<O: Operation> HookPipeline<O> {
    pub fn new() -> Self {
        Self { before: Vec::new(),
               after: Vec::new() }
    }

    /// Registra un hook al final de su fase.
    pub fn register(&mut self, hook: Arc<dyn Hook<O>>) {
        match hook.phase() {
            HookPhase::Before => self.before.push(hook),
            HookPhase::After => self.after.push(hook),
        }
    }

    pub fn before_hooks(&self) -> Vec<&str> {
        self.before.iter().map(|h| h.name()).collect()
    }

    pub fn after_hooks(&self) -> Vec<&str> {
        self.after.iter().map(|h| h.name()).collect()
    }

    pub fn run(&self, operation: &O, scope: &mut Scope<'_, O>) -> Result<(), OperationError> {
        let region = self.halt_boundary(operation, scope);
        let after = self.run_after(scope);
        match (region, after) {
            (Err(err), Err(shadowed)) => {
                warn!("after-phase fault shadowed by earlier fault id={}: {shadowed}", scope.context().id());
                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(()), after) => after,
        }
    }

    fn halt_boundary(&self, operation: &O, scope: &mut Scope<'_, O>) -> Result<(), OperationError> {
        let mut at = String::new();
        match self.run_region(operation, scope, &mut at) {
            Ok(()) => Ok(()),
            Err(Interrupt::Halt(_)) => {
                debug!("halted id={} at={at}", scope.context().id());
                scope.context_mut().record(LifecycleEventKind::Halted { at });
                Ok(())
            }
            Err(Interrupt::Fault(err)) => {
                warn!("fault id={} at={at}: {err}", scope.context().id());
                scope.context_mut()
                     .record(LifecycleEventKind::Faulted { at,
                                                           error: err.clone() });
                Err(err)
            }
        }
    }

    fn run_region(&self, operation: &O, scope: &mut Scope<'_, O>, at: &mut String) -> Flow {
        for hook in &self.before {
            *at = hook.name().to_string();
            debug!("hook:before name={at} id={}", scope.context().id());
            scope.context_mut()
                 .record(LifecycleEventKind::HookRan { phase: HookPhase::Before,
                                                       hook: at.clone() });
            hook.run(scope)?;
        }
        *at = "call".to_string();
        scope.context_mut().record(LifecycleEventKind::CallRan);
        operation.call(scope)
    }

    /// Corre todos los after-hooks aunque alguno falle; devuelve el primer
    /// fallo.
    fn run_after(&self, scope: &mut Scope<'_, O>) -> Result<(), OperationError> {
        let mut first_fault = None;
        for hook in &self.after {
            let name = hook.name().to_string();
            debug!("hook:after name={name} id={}", scope.context().id());
            scope.context_mut()
                 .record(LifecycleEventKind::HookRan { phase: HookPhase::After,
                                                       hook: name.clone() });
            match hook.run(scope) {
                Ok(()) => {}
                // Nada que saltar en esta fase.
                Err(Interrupt::Halt(_)) => debug!("hook:after name={name} halted (ignored)"),
                Err(Interrupt::Fault(err)) => {
                    warn!("hook:after name={name} id={}: {err}", scope.context().id());
                    scope.context_mut()
                         .record(LifecycleEventKind::Faulted { at: name,
                                                               error: err.clone() });
                    first_fault.get_or_insert(err);
                }
            }
        }
        match first_fault {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<O: Operation> Default for HookPipeline<O> {
    fn default() -> Self {
        Self::new()
    }
}
