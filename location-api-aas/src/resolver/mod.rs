use crate::{
    config::QueryConfiguration,
    error::{QueryResult, ResolveError, ResolveResult},
};
use location_api_lib::{geometry::Point3D, model::position::Position, reply::ReplyParser};
use std::sync::Arc;
use strum::Display;
use tracing::{debug, instrument, warn};

pub mod query;
pub mod replay;

pub use query::RemoteQueryService;

/// Which of the two queries issued for a resolution something happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum QueryKind {
    Position,
    Dimension,
}

/// Resolves a player's position by querying the server for both its coordinates and its
/// dimension.
pub struct PositionResolver<S: RemoteQueryService + ?Sized> {
    service: Arc<S>,
    queries: QueryConfiguration,
    parser: ReplyParser,
}

impl<S: RemoteQueryService + ?Sized> PositionResolver<S> {
    pub fn new(service: Arc<S>, queries: QueryConfiguration, parser: ReplyParser) -> Self {
        Self {
            service,
            queries,
            parser,
        }
    }

    pub fn with_defaults(service: Arc<S>) -> Self {
        Self::new(service, QueryConfiguration::default(), ReplyParser::default())
    }

    /// Resolve `player` to a [`Position`].
    ///
    /// Both queries are always sent, concurrently. The position reply is checked first, so
    /// when both fail the position failure is the one returned.
    #[instrument(skip(self))]
    pub async fn resolve_position(&self, player: &str) -> ResolveResult<Position> {
        let position_command = self.queries.command_for(QueryKind::Position, player);
        let dimension_command = self.queries.command_for(QueryKind::Dimension, player);

        let (position_reply, dimension_reply) = tokio::join!(
            self.service.query(&position_command),
            self.service.query(&dimension_command),
        );

        let result = promote_to_text(position_reply, player, QueryKind::Position)
            .and_then(|text| self.parse_point(&text, player))
            .and_then(|point| {
                promote_to_text(dimension_reply, player, QueryKind::Dimension)
                    .and_then(|text| self.parse_dimension(&text, player))
                    .map(|dimension| Position::new(point, dimension))
            });

        match &result {
            Ok(position) => debug!("Resolved {player} to {position}"),
            Err(error) => warn!(query = %error.query(), "Unable to resolve {player}: {error}"),
        }

        result
    }

    fn parse_point(&self, text: &str, player: &str) -> ResolveResult<Point3D> {
        self.parser
            .extract_point(text, Some(player))
            .map_err(|source| ResolveError::Extraction {
                player: player.to_owned(),
                query: QueryKind::Position,
                source,
            })?
            .ok_or_else(|| ResolveError::NoDataFor {
                player: player.to_owned(),
                query: QueryKind::Position,
            })
    }

    fn parse_dimension(&self, text: &str, player: &str) -> ResolveResult<String> {
        self.parser
            .extract_dimension(text, Some(player))
            .ok_or_else(|| ResolveError::NoDataFor {
                player: player.to_owned(),
                query: QueryKind::Dimension,
            })
    }
}

/// Fold both failure layers of a raw reply, transport failure and empty reply, into one.
fn promote_to_text(reply: QueryResult, player: &str, query: QueryKind) -> ResolveResult<String> {
    reply
        .map_err(|source| ResolveError::Transport {
            player: player.to_owned(),
            query,
            source,
        })
        .and_then(|text| {
            text.ok_or_else(|| ResolveError::NoData {
                player: player.to_owned(),
                query,
            })
        })
}
