//! One-shot configuration readiness signal.
//!
//! The loader publishes the frozen `Arc<SiteConfig>` exactly once; consumers
//! either peek with [`ConfigReady::get`] or await [`ConfigReady::wait`].
//! Backed by a `tokio::sync::watch` channel, so late subscribers still see
//! the published value.

use super::ConfigError;
use crate::config::SiteConfig;
use std::sync::Arc;
use tokio::sync::watch;

type Slot = Option<Arc<SiteConfig>>;

/// Publishing side, held by whoever loads the configuration.
pub struct ConfigSignal {
    tx: watch::Sender<Slot>,
}

impl Default for ConfigSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn subscribe(&self) -> ConfigReady {
        ConfigReady {
            rx: self.tx.subscribe(),
        }
    }

    /// Freeze and publish `config`. A second publish is rejected.
    pub fn publish(&self, config: SiteConfig) -> Result<Arc<SiteConfig>, ConfigError> {
        if self.tx.borrow().is_some() {
            return Err(ConfigError::AlreadyPublished);
        }
        let config = Arc::new(config);
        self.tx.send_replace(Some(Arc::clone(&config)));
        Ok(config)
    }
}

/// Consuming side, cheap to clone.
#[derive(Clone)]
pub struct ConfigReady {
    rx: watch::Receiver<Slot>,
}

impl ConfigReady {
    /// The published config, if loading has finished.
    pub fn get(&self) -> Option<Arc<SiteConfig>> {
        self.rx.borrow().clone()
    }

    /// Wait until the config is published.
    ///
    /// Returns `None` if the signal was dropped without publishing.
    pub async fn wait(&self) -> Option<Arc<SiteConfig>> {
        let mut rx = self.rx.clone();
        let slot = rx.wait_for(Option::is_some).await.ok()?;
        slot.clone()
    }
}
