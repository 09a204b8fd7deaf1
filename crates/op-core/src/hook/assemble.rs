use crate::errors::OperationError;
use crate::flow::Flow;
use crate::hook::{Hook, HookPhase};
use crate::model::Context;
use crate::operation::Operation;
use crate::pipeline::Scope;
use crate::status::{names, CanonicalStatus, StatusTable};

/// Reconciliación del status en la fase after:
/// 1. default-fill (`ok` si hay payload, `no_content` si no),
/// 2. validación contra `StatusTable`,
/// 3. canonicalización al nombre simbólico,
/// 4. `failed = true` salvo clase 2xx/3xx.
pub fn assemble<U>(ctx: &mut Context<U>) -> Result<CanonicalStatus, OperationError> {
    if ctx.status().is_none() {
        let fill = if ctx.payload().is_some() { names::OK } else { names::NO_CONTENT };
        ctx.set_status(fill);
    }
    let status = ctx.status()
                    .cloned()
                    .ok_or_else(|| OperationError::InvalidStatus("<absent>".into()))?;
    let canonical = StatusTable::canonicalize(&status)?;
    ctx.set_status(canonical);
    ctx.mark_failed(!canonical.is_success());
    Ok(canonical)
}

/// After-hook del core; se registra detrás de los after-hooks del usuario.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssembleResponse;

impl<O: Operation> Hook<O> for AssembleResponse {
    fn name(&self) -> &str {
        "assemble_response"
    }

    fn phase(&self) -> HookPhase {
        HookPhase::After
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        assemble(scope.context_mut())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Seed;
    use crate::status::Status;
    use serde_json::json;

    fn ctx() -> Context<()> {
        Seed::new().into_context()
    }

    #[test]
    fn default_fill_depends_on_payload() {
        let mut empty = ctx();
        assert_eq!(assemble(&mut empty).unwrap().name(), "no_content");

        let mut with_payload = ctx();
        with_payload.set_payload(json!({"pong": "hi"}));
        assert_eq!(assemble(&mut with_payload).unwrap().name(), "ok");
    }

    #[test]
    fn integer_codes_are_canonicalized_in_place() {
        let mut c = ctx();
        c.set_status(201u16);
        assemble(&mut c).unwrap();
        assert_eq!(c.status(), Some(&Status::from("created")));
        assert!(!c.is_failed());
    }

    #[test]
    fn failed_tracks_status_class() {
        for (code, failed) in [(404u16, true), (201, false), (204, false), (500, true), (301, false), (100, true)] {
            let mut c = ctx();
            c.set_status(code);
            assemble(&mut c).unwrap();
            assert_eq!(c.is_failed(), failed, "code {code}");
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut c = ctx();
        c.set_status("teapot_ish");
        assert_eq!(assemble(&mut c), Err(OperationError::InvalidStatus("teapot_ish".into())));
    }
}
