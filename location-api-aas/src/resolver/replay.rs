use super::RemoteQueryService;
use crate::{
    config::ReplayConfiguration,
    error::{QueryError, QueryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, trace};

/// A query service answering from recorded replies instead of a live server.
///
/// Commands without a recording get an empty reply. A recording equal to the failure
/// marker is replayed as a transport failure.
#[derive(Debug, Default, Clone)]
pub struct ReplayQueryService {
    replies: HashMap<String, String>,
    failure_marker: Option<String>,
}

impl ReplayQueryService {
    #[must_use]
    pub fn new(replies: HashMap<String, String>, failure_marker: Option<String>) -> Self {
        Self {
            replies,
            failure_marker,
        }
    }

    #[must_use]
    pub fn from_config(config: &ReplayConfiguration) -> Self {
        Self::new(config.replies.clone(), config.failure_marker.clone())
    }

    #[must_use]
    pub fn with_reply(mut self, command: impl Into<String>, reply: impl Into<String>) -> Self {
        self.replies.insert(command.into(), reply.into());
        self
    }
}

#[async_trait]
impl RemoteQueryService for ReplayQueryService {
    async fn query(&self, command: &str) -> QueryResult {
        let Some(reply) = self.replies.get(command) else {
            debug!("No recorded reply for {command:?}");
            return Ok(None);
        };

        if self.failure_marker.as_ref() == Some(reply) {
            return Err(QueryError::Rejected(format!(
                "Recorded failure for command {command:?}"
            )));
        }

        trace!("Replaying reply for {command:?}: {reply:?}");
        Ok(Some(reply.clone()))
    }
}
