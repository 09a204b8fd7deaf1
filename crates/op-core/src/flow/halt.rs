use crate::errors::OperationError;

/// Señal de salida anticipada. No lleva datos: lo que ya esté en el contexto
/// se conserva tal cual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Halt;

/// Motivo por el que un paso no continuó.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupt {
    Halt(Halt),
    Fault(OperationError),
}

impl Interrupt {
    pub fn is_halt(&self) -> bool {
        matches!(self, Interrupt::Halt(_))
    }
}

impl From<Halt> for Interrupt {
    fn from(halt: Halt) -> Self {
        Interrupt::Halt(halt)
    }
}

impl From<OperationError> for Interrupt {
    fn from(err: OperationError) -> Self {
        Interrupt::Fault(err)
    }
}

/// Resultado de un paso del pipeline (hook o `call`).
pub type Flow<T = ()> = Result<T, Interrupt>;
