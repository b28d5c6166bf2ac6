//! Replies of the `!!loc_api debug pos <player>` command.
//!
//! Registering the command tree is left to the host; this only produces the reply text.

use crate::{
    error::{ErrorChainExt, ResolveResult},
    resolver::{PositionResolver, RemoteQueryService},
};
use indoc::formatdoc;
use location_api_lib::model::position::Position;

pub const COMMAND_PREFIX: &str = "!!loc_api";

#[must_use]
pub fn debug_pos_help() -> String {
    formatdoc! {"
        Usage: {COMMAND_PREFIX} debug pos <player>"
    }
}

/// Render a resolution outcome. Failures are rendered with their whole cause chain.
#[must_use]
pub fn render_resolution(result: &ResolveResult<Position>) -> String {
    match result {
        Ok(position) => format!("Get result: {position}"),
        Err(error) => format!("Failed to get player position: {}", error.chain_message()),
    }
}

pub async fn on_debug_pos<S: RemoteQueryService + ?Sized>(
    resolver: &PositionResolver<S>,
    player: &str,
) -> String {
    render_resolution(&resolver.resolve_position(player).await)
}
