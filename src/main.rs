//! # ExpoFlow order tracker
//!
//! Follows one exhibitor's orders against the backend named by
//! `EXPOFLOW_API_URL` and logs every published view until Ctrl-C.
//!
//! ```bash
//! RUST_LOG=info cargo run -- green-energy
//! ```

use expoflow_sync::lifecycle::{setup_tracing, OrderTracker, TrackerConfig};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = TrackerConfig::from_env().map_err(|e| e.to_string())?;
    let exhibitor = std::env::args().nth(1).unwrap_or_else(|| "tech-innovations".to_string());

    let tracker = OrderTracker::new(config).map_err(|e| e.to_string())?;

    let identity = tracker
        .client
        .select_identity(exhibitor.as_str())
        .await
        .map_err(|e| e.to_string())?;
    info!(booth = %identity.booth, company = %identity.company, "Tracking {}", identity.display_name);

    let mut views = tracker.client.subscribe();
    let watch = async {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if view.loading() {
                continue;
            }
            info!(
                revision = view.revision,
                orders = view.order_count(),
                delivered = view.delivered_count(),
                pending = view.pending_count(),
                health = ?view.health(),
                placeholder = view.is_placeholder(),
                "View updated"
            );
            for notification in view.notifications() {
                info!(category = %notification.category, "{}", notification.message);
            }
            if let Some(error) = &view.last_error {
                warn!(%error, "Last sync failed");
            }
        }
    }
    .instrument(tracing::info_span!("view"));

    tokio::select! {
        _ = watch => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
        }
    }

    tracker.client.logout().await.map_err(|e| e.to_string())?;
    drop(views);
    tracker.shutdown().await
}
