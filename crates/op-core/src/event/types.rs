//! Tipos de evento del ciclo de vida y estructura `LifecycleEvent`.
//!
//! Rol en el flujo:
//! - Cada invocación agrega eventos append-only al journal de su `Context`.
//! - El journal permite reconstruir qué hooks corrieron, dónde se detuvo la
//!   ejecución y con qué resultado terminó, sin inspeccionar estado mutable.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::OperationError;
use crate::hook::HookPhase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifecycleEventKind {
    /// Primer evento de toda invocación.
    InvocationStarted { operation: String },
    /// Un hook registrado se ejecutó (independiente de su resultado).
    HookRan { phase: HookPhase, hook: String },
    /// Se invocó la lógica de negocio.
    CallRan,
    /// Un paso emitió `Halt`; `at` es el hook o `call`.
    Halted { at: String },
    /// Un paso devolvió un fallo que se propagará tras la fase after.
    Faulted { at: String, error: OperationError },
    Authorized { action: String, allowed: bool },
    Validated { valid: bool },
    /// Cierre con el status canónico ya resuelto.
    InvocationFinished { status: String, failed: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub seq: u64, // orden de append dentro de la invocación
    pub invocation_id: Uuid,
    pub kind: LifecycleEventKind,
    pub ts: DateTime<Utc>, // metadato
}
