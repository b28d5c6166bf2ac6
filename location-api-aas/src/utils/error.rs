use crate::resolver::QueryKind;
use location_api_lib::errors::ExtractionError;
use std::error::Error as StdError;
use thiserror::Error;

/// Failure reported by a remote query service.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Boxed(Box<dyn StdError + Send + Sync>),
}

/// The single failure channel of position resolution.
///
/// Every variant names the player and the query it happened on, and keeps the underlying
/// cause as its source.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Transport failure ({query} query for {player})")]
    Transport {
        player: String,
        query: QueryKind,
        #[source]
        source: QueryError,
    },
    #[error("No data received ({query} query for {player})")]
    NoData { player: String, query: QueryKind },
    #[error("Unable to extract {query} from the reply for {player}")]
    Extraction {
        player: String,
        query: QueryKind,
        #[source]
        source: ExtractionError,
    },
    #[error("No data received for {player} ({query} reply)")]
    NoDataFor { player: String, query: QueryKind },
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Unable to load configuration")]
    Load(#[from] twelf::Error),
    #[error("Invalid {name} pattern")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid tracing filter")]
    InvalidTracingFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("Unable to install tracing subscriber")]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
    #[error("No recorded replies are configured")]
    MissingReplayConfiguration,
}

pub type QueryResult = std::result::Result<Option<String>, QueryError>;
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
pub type ConfigurationResult<T> = std::result::Result<T, ConfigurationError>;

impl ResolveError {
    #[must_use]
    pub fn player(&self) -> &str {
        match self {
            Self::Transport { player, .. }
            | Self::NoData { player, .. }
            | Self::Extraction { player, .. }
            | Self::NoDataFor { player, .. } => player,
        }
    }

    #[must_use]
    pub const fn query(&self) -> QueryKind {
        match self {
            Self::Transport { query, .. }
            | Self::NoData { query, .. }
            | Self::Extraction { query, .. }
            | Self::NoDataFor { query, .. } => *query,
        }
    }
}

pub trait ErrorChainExt {
    /// The error message followed by the messages of all of its sources.
    fn chain_message(&self) -> String;
}

impl<E: StdError> ErrorChainExt for E {
    fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();

        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        message
    }
}
