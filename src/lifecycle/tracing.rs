//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden (`with_target(false)`); fetch cycles run
//! inside a `sync_cycle` span carrying `identity` and `cycle`, so every line a
//! cycle emits is attributed to it.
//!
//! ## Levels
//!
//! - `info` – actor lifecycle, identity changes, committed cycles
//! - `warn` – degraded fetches, rejected orders, status anomalies
//! - `debug` – requests, published revisions, discarded stale results
//!
//! ```bash
//! RUST_LOG=info cargo run -- green-energy
//! RUST_LOG=expoflow_sync=debug cargo run
//! ```
//!
//! With `RUST_LOG=info`, one cycle against an unreachable backend reads:
//!
//! ```text
//! INFO Identity selected identity=tech-innovations name=TechFlow Innovations
//! WARN sync_cycle: Fetch failed, using placeholder orders identity=tech-innovations error=...
//! INFO Cycle committed cycle=tech-innovations#1 orders=2 notifications=0 health=Degraded
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
