//! CLI mínima: `opflow <operación> [--params JSON] [--user ID] [--admin]`.
//!
//! Invoca una operación del dominio posts sobre un store sembrado y devuelve
//! el descriptor de respuesta como JSON.

use std::sync::Arc;

use log::debug;
use op_adapters::app::OPERATIONS;
use op_adapters::{PostStore, PostsApp, User};
use op_core::{EngineConfig, Seed};
use serde_json::Value;

use crate::errors::CliError;

pub const USAGE: &str = "usage: opflow <ping|create|index|show|update> [--params JSON] [--user ID] [--admin]";

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub operation: String,
    pub params: Value,
    pub user: Option<User>,
}

pub fn parse(args: &[String]) -> Result<Invocation, CliError> {
    let mut args = args.iter();
    let operation = args.next().ok_or_else(|| CliError::Usage(USAGE.into()))?.clone();
    let mut params = Value::Object(Default::default());
    let mut user_id: Option<u64> = None;
    let mut admin = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--params" => {
                let raw = args.next().ok_or_else(|| CliError::Usage("--params needs a value".into()))?;
                params = serde_json::from_str(raw)?;
                if !params.is_object() {
                    return Err(CliError::Usage("--params must be a JSON object".into()));
                }
            }
            "--user" => {
                let raw = args.next().ok_or_else(|| CliError::Usage("--user needs a value".into()))?;
                let id = raw.parse().map_err(|_| CliError::Usage(format!("--user expects a numeric id, got `{raw}`")))?;
                user_id = Some(id);
            }
            "--admin" => admin = true,
            other => return Err(CliError::Usage(format!("unexpected argument `{other}`\n{USAGE}"))),
        }
    }

    let user = match (user_id, admin) {
        (Some(id), true) => Some(User::admin(id)),
        (Some(id), false) => Some(User::new(id)),
        (None, true) => return Err(CliError::Usage("--admin requires --user".into())),
        (None, false) => None,
    };
    Ok(Invocation { operation,
                    params,
                    user })
}

/// Ejecuta la invocación y devuelve el `Response` serializado.
pub fn run(args: &[String]) -> Result<String, CliError> {
    if args.first().is_some_and(|a| a == "--help" || a == "-h") {
        return Ok(USAGE.to_string());
    }
    let invocation = parse(args)?;
    if !OPERATIONS.contains(&invocation.operation.as_str()) {
        return Err(CliError::UnknownOperation(invocation.operation));
    }

    let config = EngineConfig::from_env();
    debug!("cli operation={} config={config:?}", invocation.operation);
    let app = PostsApp::new(Arc::new(PostStore::seeded()), config)?;

    let mut seed = Seed::new().params(invocation.params);
    if let Some(user) = invocation.user {
        seed = seed.user(user);
    }
    let response = app.call(&invocation.operation, seed)
                      .ok_or_else(|| CliError::UnknownOperation(invocation.operation.clone()))??;
    Ok(serde_json::to_string_pretty(&response)?)
}
