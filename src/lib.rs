//! opflow: fachada del motor de operaciones.
//!
//! - Reexporta `op_core` (motor) y `op_adapters` (dominio posts).
//! - `cli` implementa la línea de comandos del binario `opflow`.
//! - `errors` define los errores de la aplicación.

pub mod cli;
pub mod errors;

pub use op_adapters;
pub use op_core;

pub use errors::CliError;
pub use op_core::{Completed, Context, EngineConfig, Flow, Operation, OperationEngine, OperationError, Respond, Response,
                  Scope, Seed, Status};
