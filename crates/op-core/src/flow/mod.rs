//! Control de flujo cooperativo dentro de una invocación.
//!
//! `Halt` detiene los pasos restantes (before-hooks y `call`) sin que cuente
//! como fallo. Se propaga con `?` a través de `Flow` hasta el límite del
//! pipeline, que lo absorbe. Los fallos reales viajan como
//! `Interrupt::Fault` y sí escapan al caller.

mod halt;

pub use halt::{Flow, Halt, Interrupt};
