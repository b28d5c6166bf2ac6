use std::{collections::HashMap, path::Path};

use location_api_lib::reply::{ReplyParser, DEFAULT_DIMENSION_PATTERN, DEFAULT_POINT_PATTERN, NOT_FOUND_MARKER};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use twelf::{config, Layer};

use crate::{
    error::{ConfigurationError, ConfigurationResult},
    resolver::QueryKind,
};

/// Placeholder substituted with the player name in query command templates.
pub const PLAYER_PLACEHOLDER: &str = "{player}";

/// Prefix of the environment variables read on top of the configuration file.
pub const ENV_PREFIX: &str = "LOC_API_";

#[config]
#[derive(Default, Debug)]
pub struct LocationApiConfiguration {
    pub queries: Option<QueryConfiguration>,
    pub parsing: Option<ParsingConfiguration>,
    pub tracing: Option<TracingConfiguration>,
    pub replay: Option<ReplayConfiguration>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct QueryConfiguration {
    /// The command used to query a player's position.
    #[serde(default = "default_position_command")]
    pub position_command: String,

    /// The command used to query a player's dimension.
    #[serde(default = "default_dimension_command")]
    pub dimension_command: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ParsingConfiguration {
    /// Overrides the pattern used to locate a point in position replies.
    /// It must capture the x, y and z values in its first three groups.
    pub point_pattern: Option<String>,

    /// Overrides the pattern used to locate a dimension in dimension replies.
    pub dimension_pattern: Option<String>,

    /// The reply text meaning that the requested entity does not exist.
    #[serde(default = "default_not_found_marker")]
    pub not_found_marker: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TracingConfiguration {
    /// The default filter directives, used unless `RUST_LOG` is set.
    #[serde(default = "default_tracing_filter")]
    pub filter: String,

    /// Whether to log as JSON lines.
    #[serde(default)]
    pub json: bool,
}

#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReplayConfiguration {
    /// Recorded replies, keyed by the exact command they answer.
    #[serde(default)]
    pub replies: HashMap<String, String>,

    /// A recorded reply equal to this marker is replayed as a transport failure.
    pub failure_marker: Option<String>,
}

impl LocationApiConfiguration {
    /// Load the configuration from an optional TOML file, then from the environment.
    ///
    /// Pattern overrides are compiled here, so a bad pattern fails the load.
    pub fn load(path: Option<&Path>) -> ConfigurationResult<Self> {
        let mut layers = Vec::new();

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            layers.push(Layer::Toml(path.to_path_buf()));
        }

        layers.push(Layer::Env(Some(ENV_PREFIX.to_string())));

        let config = Self::with_layers(&layers)?;
        config.parsing().build_parser()?;

        Ok(config)
    }

    #[must_use]
    pub fn queries(&self) -> QueryConfiguration {
        self.queries.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn parsing(&self) -> ParsingConfiguration {
        self.parsing.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn tracing(&self) -> TracingConfiguration {
        self.tracing.clone().unwrap_or_default()
    }
}

impl QueryConfiguration {
    #[must_use]
    pub fn command_for(&self, query: QueryKind, player: &str) -> String {
        let template = match query {
            QueryKind::Position => &self.position_command,
            QueryKind::Dimension => &self.dimension_command,
        };

        template.replace(PLAYER_PLACEHOLDER, player)
    }
}

impl ParsingConfiguration {
    pub fn build_parser(&self) -> ConfigurationResult<ReplyParser> {
        let point_pattern = compile("point", self.point_pattern.as_deref(), DEFAULT_POINT_PATTERN)?;
        let dimension_pattern = compile(
            "dimension",
            self.dimension_pattern.as_deref(),
            DEFAULT_DIMENSION_PATTERN,
        )?;

        Ok(ReplyParser::new(
            point_pattern,
            dimension_pattern,
            self.not_found_marker.clone(),
        ))
    }
}

fn compile(name: &'static str, pattern: Option<&str>, default: &str) -> ConfigurationResult<Regex> {
    let pattern = pattern.unwrap_or(default);
    trace!("Compiling {name} pattern {pattern:?}");

    Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern { name, source })
}

impl Default for QueryConfiguration {
    fn default() -> Self {
        Self {
            position_command: default_position_command(),
            dimension_command: default_dimension_command(),
        }
    }
}

impl Default for ParsingConfiguration {
    fn default() -> Self {
        Self {
            point_pattern: None,
            dimension_pattern: None,
            not_found_marker: default_not_found_marker(),
        }
    }
}

impl Default for TracingConfiguration {
    fn default() -> Self {
        Self {
            filter: default_tracing_filter(),
            json: false,
        }
    }
}

fn default_position_command() -> String {
    "data get entity {player} Pos".to_string()
}

fn default_dimension_command() -> String {
    "data get entity {player} Dimension".to_string()
}

fn default_not_found_marker() -> String {
    NOT_FOUND_MARKER.to_string()
}

fn default_tracing_filter() -> String {
    "info".to_string()
}
