use ctrl_query::QueryEngine;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct NavResponse<'a> {
    id: &'a str,
    found: bool,
    prev: Option<&'a str>,
    next: Option<&'a str>,
}

pub fn handle(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&build(&ctx.engine, id), flags.format)
}

fn build<'a>(engine: &'a QueryEngine, id: &'a str) -> NavResponse<'a> {
    let navigation = engine.navigate(id);
    NavResponse {
        id,
        found: engine.find_by_id(id).is_some(),
        prev: navigation.prev,
        next: navigation.next,
    }
}
