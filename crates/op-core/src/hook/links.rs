use crate::constants::{LINK_HEADER, LINK_SEPARATOR};
use crate::flow::Flow;
use crate::hook::{Hook, HookPhase};
use crate::model::Context;
use crate::operation::Operation;
use crate::pipeline::Scope;

/// Reconstruye el header `Link` desde `links`. Las URLs vacías se omiten; sin
/// entradas el header queda sin definir.
pub fn build_link_header<U>(ctx: &mut Context<U>) {
    ctx.headers_mut().retain(|name, _| !name.eq_ignore_ascii_case(LINK_HEADER));
    let rendered: Vec<String> = ctx.links()
                                   .iter()
                                   .filter(|(_, url)| !url.is_empty())
                                   .map(|(relation, url)| format!("<{url}>; rel=\"{relation}\""))
                                   .collect();
    if !rendered.is_empty() {
        ctx.headers_mut().insert(LINK_HEADER.to_string(), rendered.join(LINK_SEPARATOR));
    }
}

/// After-hook opcional (`EngineConfig::link_header`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildLinkHeader;

impl<O: Operation> Hook<O> for BuildLinkHeader {
    fn name(&self) -> &str {
        "build_link_header"
    }

    fn phase(&self) -> HookPhase {
        HookPhase::After
    }

    fn run(&self, scope: &mut Scope<'_, O>) -> Flow {
        build_link_header(scope.context_mut());
        Ok(())
    }
}
