//! Sync adapters - outbound mirroring to the remote ticket service.
//!
//! - `HttpSyncPublisher` - the real publisher (reqwest)
//! - `SyncAuthResolver` - integration key / bearer token strategy and token cache
//! - `DetachedSyncPublisher` - spawns each publish onto its own task
//! - `DisabledSyncPublisher` - wired when no base URL is configured
//! - `RecordingSyncPublisher` - captures events for tests

mod auth_resolver;
mod detached;
mod disabled;
mod http_publisher;
mod recording;

use std::sync::Arc;

pub use auth_resolver::{SyncAuthResolver, SyncCredential, INTEGRATION_KEY_HEADER};
pub use detached::DetachedSyncPublisher;
pub use disabled::DisabledSyncPublisher;
pub use http_publisher::HttpSyncPublisher;
pub use recording::RecordingSyncPublisher;

use crate::config::{DispatchMode, SyncConfig};
use crate::ports::SyncPublisher;

/// Builds the publisher described by the sync configuration.
///
/// # Errors
///
/// Fails only if the HTTP client cannot be constructed.
pub fn build_sync_publisher(config: &SyncConfig) -> Result<Arc<dyn SyncPublisher>, reqwest::Error> {
    if !config.is_enabled() {
        tracing::info!("Remote sync disabled (no sync.base_url)");
        return Ok(Arc::new(DisabledSyncPublisher));
    }

    let http = HttpSyncPublisher::new(config)?;
    tracing::info!(
        base_url = config.base_url().unwrap_or_default(),
        auth_mode = ?http.auth_mode(),
        dispatch = ?config.dispatch,
        "Remote sync enabled"
    );

    let http: Arc<dyn SyncPublisher> = Arc::new(http);
    Ok(match config.dispatch {
        DispatchMode::Inline => http,
        DispatchMode::Detached => Arc::new(DetachedSyncPublisher::new(http)),
    })
}
