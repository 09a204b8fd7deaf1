//! Status HTTP: tabla canónica y representación de valores.
//!
//! - `StatusTable`: biyección fija código <-> nombre simbólico.
//! - `Status`: lo que la lógica de negocio escribe en el contexto (código o
//!   nombre, todavía sin validar).
//! - `CanonicalStatus`: resultado de validar + canonicalizar.

mod table;
mod value;

pub use table::StatusTable;
pub use value::{CanonicalStatus, Status};

/// Nombres usados por el propio motor.
pub mod names {
    pub const OK: &str = "ok";
    pub const CREATED: &str = "created";
    pub const NO_CONTENT: &str = "no_content";
    pub const FORBIDDEN: &str = "forbidden";
    pub const NOT_FOUND: &str = "not_found";
    pub const UNPROCESSABLE_ENTITY: &str = "unprocessable_entity";
}
