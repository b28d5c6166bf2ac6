use crate::error::QueryResult;
use async_trait::async_trait;

/// The transport that sends commands to the game server and returns its raw reply.
///
/// A reply is either some text, nothing at all (`Ok(None)`), or a failure. Timeouts and
/// retries are up to the implementation.
#[async_trait]
pub trait RemoteQueryService: Send + Sync {
    async fn query(&self, command: &str) -> QueryResult;
}
