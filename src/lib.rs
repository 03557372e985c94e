//! # ExpoFlow Order Sync
//!
//! > **Keeps an exhibitor's view of their trade-show orders in step with the backend.**
//!
//! A single actor polls the exhibitor backend on a fixed delay, validates what it
//! gets back, diffs it against the last confirmed snapshot and publishes one atomic
//! view for presentation to read.
//!
//! ## 🏗️ Design
//!
//! ### One writer
//! The sync actor is the only task that mutates state. Commands (`select_identity`,
//! `logout`, `refresh_now`), finished fetches and the polling timer all arrive on the
//! same loop, so a commit never races a command and two fetches never overlap.
//!
//! ### Explicit outcomes
//! A fetch is [`Fresh`](fetcher::FetchResult::Fresh), [`Degraded`](fetcher::FetchResult::Degraded)
//! or [`Failed`](fetcher::FetchResult::Failed). Placeholder data is never passed off as live:
//! the published [`ViewState`](store::ViewState) carries a [`SyncHealth`](store::SyncHealth).
//!
//! ### Stale results cannot land
//! Every cycle carries a [`CycleTag`](sync_actor::CycleTag). Logging out or switching
//! exhibitors aborts the outstanding fetch, and anything it still reports fails the tag check.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Statuses and their catalog, orders, identities, snapshots and notifications.
//!
//! ### 2. The Fetch ([`fetcher`])
//! - **Role**: One reconciliation cycle, from HTTP request to validated [`Snapshot`](model::Snapshot).
//! - **Key items**: [`OrderSource`](fetcher::OrderSource), [`HttpOrderSource`](fetcher::HttpOrderSource),
//!   [`OrderFetcher`](fetcher::OrderFetcher).
//!
//! ### 3. The Diff ([`deriver`])
//! Turns status transitions into at most three [`Notification`](model::Notification)s and
//! reports anomalies.
//!
//! ### 4. The View ([`store`])
//! Builds and publishes each [`ViewState`](store::ViewState) through a `watch` channel.
//!
//! ### 5. The Engine ([`sync_actor`], [`framework`])
//! The scheduler's state machine and actor loop, on top of the generic mailbox plumbing.
//!
//! ### 6. The Interface ([`clients`])
//! [`SyncClient`](clients::SyncClient) hides the message passing.
//!
//! ### 7. The Orchestrator ([`lifecycle`])
//! [`OrderTracker`](lifecycle::OrderTracker) wires and spawns everything;
//! [`TrackerConfig`](lifecycle::TrackerConfig) reads the environment.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! EXPOFLOW_API_URL=http://localhost:5000/api RUST_LOG=info cargo run -- tech-innovations
//! ```

pub mod clients;
pub mod deriver;
pub mod fetcher;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod store;
pub mod sync_actor;
