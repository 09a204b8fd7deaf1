//! Journal de ciclo de vida por invocación.

mod types;

pub use types::{LifecycleEvent, LifecycleEventKind};
