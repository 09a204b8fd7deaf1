//! op-core: motor de ciclo de vida de operaciones.
//!
//! Una operación atiende una única petición y produce un resultado
//! normalizado (status, payload, headers). El motor envuelve la lógica de
//! negocio con un pipeline de hooks en tres fases (before / around / after),
//! un contexto mutable por invocación, la señal `Halt` para salir antes de
//! tiempo y la normalización del status contra `StatusTable`.
pub mod capability;
pub mod config;
pub mod constants;
pub mod errors;
pub mod event;
pub mod flow;
pub mod hook;
pub mod model;
pub mod operation;
pub mod pipeline;
pub mod status;

pub use capability::{Authorizable, Authorized, Contract, ContractClass, Decorated, DecoratorClass, Policy, PolicyClass,
                     Resolver, Validatable, Validated};
pub use config::EngineConfig;
pub use errors::OperationError;
pub use event::{LifecycleEvent, LifecycleEventKind};
pub use flow::{Flow, Halt, Interrupt};
pub use hook::{FnHook, Hook, HookPhase};
pub use model::{Completed, Context, ErrorPayload, Headers, Links, Params, Resource, Respond, Response, Seed,
                ValidationErrors};
pub use operation::{canonical_identity, EngineBuilder, Operation, OperationConfig, OperationEngine};
pub use pipeline::{HookPipeline, Scope};
pub use status::{CanonicalStatus, Status, StatusTable};
