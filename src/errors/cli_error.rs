use op_core::OperationError;
use thiserror::Error;

/// Errores de la línea de comandos. Cada variante tiene su código de salida.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("unknown operation `{0}`")]
    UnknownOperation(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("operation failed: {0}")]
    Operation(#[from] OperationError),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) | CliError::Json(_) => 2,
            CliError::UnknownOperation(_) => 4,
            CliError::Operation(_) => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_variant() {
        assert_eq!(CliError::Usage("x".into()).exit_code(), 2);
        assert_eq!(CliError::UnknownOperation("destroy".into()).exit_code(), 4);
        let err: CliError = OperationError::Fault("boom".into()).into();
        assert_eq!(err.exit_code(), 5);
        assert_eq!(err.to_string(), "operation failed: fault: boom");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CliError = parse.into();
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
