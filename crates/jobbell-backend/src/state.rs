use jobbell_live::SubscriptionRegistry;

use crate::{api::ApiClient, realtime::SseTransport};

/// The core application state that holds configuration, the REST client, and
/// the subscription registry.
///
/// This struct contains all the data that needs to be shared across async
/// tasks in the application. It is designed to be wrapped in a thread-safe,
/// async-friendly concurrency primitive (see [`SharedState`]) to allow safe
/// concurrent reads and occasional writes from multiple tasks. Registry
/// mutations only ever happen from the dispatch loop, one handler at a time.
pub struct State {
    /// The loaded application configuration.
    pub config: jobbell_bridge::config::Config,
    /// Client for the job-board REST endpoints.
    pub api: ApiClient,
    /// Owns the decision of when the real-time connection exists.
    pub registry: SubscriptionRegistry<SseTransport>,
}

/// Thread-safe, async-friendly shared reference to the application [`State`].
///
/// This is the recommended way to pass state into async handlers, background
/// tasks, or any context where multiple tasks need read access (and occasional
/// write access).
pub type SharedState = std::sync::Arc<tokio::sync::RwLock<State>>;
