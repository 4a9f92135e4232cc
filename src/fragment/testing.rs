//! In-memory fragment source for tests.

use super::source::{FetchError, FragmentSource};
use std::cell::Cell;
use std::collections::HashMap;
use std::time::Duration;

enum Reply {
    Body(String),
    Status(u16),
}

/// Serves canned replies; unknown names are not found.
#[derive(Default)]
pub struct MapSource {
    replies: HashMap<String, Reply>,
    delays: HashMap<String, Duration>,
    delay: Option<Duration>,
    requests: Cell<usize>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, body: &str) -> Self {
        self.replies.insert(name.into(), Reply::Body(body.into()));
        self
    }

    pub fn with_status(mut self, name: &str, status: u16) -> Self {
        self.replies.insert(name.into(), Reply::Status(status));
        self
    }

    /// Delay every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Delay replies for one name only.
    pub fn with_delay_for(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.into(), delay);
        self
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

impl FragmentSource for MapSource {
    async fn fetch(&self, name: &str) -> Result<String, FetchError> {
        self.requests.set(self.requests.get() + 1);
        if let Some(delay) = self.delays.get(name).copied().or(self.delay) {
            tokio::time::sleep(delay).await;
        }
        match self.replies.get(name) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(FetchError::Status {
                name: name.to_string(),
                status: *status,
            }),
            None => Err(FetchError::NotFound(name.to_string())),
        }
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
