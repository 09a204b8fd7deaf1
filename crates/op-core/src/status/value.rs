use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Valor de status tal como lo dejó la lógica de negocio. Puede no ser válido
/// hasta que `AssembleResponse` lo canonicaliza.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Status {
    Code(u16),
    Name(Cow<'static, str>),
}

impl Status {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }
}

impl From<u16> for Status {
    fn from(code: u16) -> Self {
        Self::Code(code)
    }
}

impl From<&'static str> for Status {
    fn from(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Status {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl From<CanonicalStatus> for Status {
    fn from(status: CanonicalStatus) -> Self {
        Self::Name(Cow::Borrowed(status.name))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{code}"),
            Status::Name(name) => f.write_str(name),
        }
    }
}

/// Status presente en `StatusTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalStatus {
    code: u16,
    name: &'static str,
}

impl CanonicalStatus {
    pub(crate) fn new(code: u16, name: &'static str) -> Self {
        Self { code, name }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Primer dígito del código (1..=5).
    pub fn class(&self) -> u16 {
        self.code / 100
    }

    /// Sólo 2xx y 3xx cuentan como éxito.
    pub fn is_success(&self) -> bool {
        matches!(self.class(), 2 | 3)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
