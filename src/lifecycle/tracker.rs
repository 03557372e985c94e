use crate::clients::SyncClient;
use crate::fetcher::{HttpOrderSource, OrderFetcher, OrderSource};
use crate::lifecycle::{ConfigError, TrackerConfig};
use crate::model::IdentityDirectory;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for order synchronization.
///
/// `OrderTracker` is responsible for:
/// - **Lifecycle Management**: Spawning the sync actor and stopping it again
/// - **Dependency Wiring**: Building the order source and fetcher from [`TrackerConfig`]
///
/// # Example
///
/// ```ignore
/// let tracker = OrderTracker::new(TrackerConfig::from_env()?)?;
///
/// tracker.client.select_identity("tech-innovations").await?;
/// let view = tracker.client.view();
///
/// tracker.shutdown().await?;
/// ```
pub struct OrderTracker {
    /// Client for commands and view reads
    pub client: SyncClient,

    handle: tokio::task::JoinHandle<()>,
}

impl OrderTracker {
    /// Starts a tracker backed by the HTTP order source.
    pub fn new(config: TrackerConfig) -> Result<Self, ConfigError> {
        let source = HttpOrderSource::new(config.http_source()).map_err(|e| ConfigError::Source(e.to_string()))?;
        Ok(Self::with_source(Arc::new(source), config))
    }

    /// Starts a tracker over any [`OrderSource`].
    pub fn with_source(source: Arc<dyn OrderSource>, config: TrackerConfig) -> Self {
        Self::with_directory(source, config, IdentityDirectory::default())
    }

    pub fn with_directory(source: Arc<dyn OrderSource>, config: TrackerConfig, directory: IdentityDirectory) -> Self {
        let fetcher = OrderFetcher::new(source, config.fallback, config.request_timeout);
        let (actor, client) = crate::sync_actor::new(directory, fetcher, config.refresh_interval);
        let handle = tokio::spawn(actor.run());

        info!(api_url = %config.api_url, fallback = ?config.fallback, "Order tracker started");
        Self { client, handle }
    }

    /// Stops the sync actor and waits for it to exit.
    ///
    /// Dropping the client closes the mailbox; the actor aborts any fetch still
    /// in flight and leaves its loop. Clones of the client held elsewhere keep
    /// the actor alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down tracker...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Sync actor failed: {:?}", e);
            return Err(format!("Sync actor failed: {:?}", e));
        }

        info!("Tracker shutdown complete.");
        Ok(())
    }
}
