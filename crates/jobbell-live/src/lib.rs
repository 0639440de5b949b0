//! Lifecycle core of the shared notification channel.
//!
//! This crate holds the logic that decides when the single real-time
//! connection exists and what the notification list looks like, with no I/O
//! of its own:
//! - [`SubscriptionRegistry`] shares one connection across any number of
//!   mounted consumers and tears it down when the last one leaves.
//! - [`NotificationStore`] keeps the newest-first notification list and the
//!   unread counter, mutated only through its three operations.
//! - [`RealtimeTransport`] is the seam behind which the concrete connection
//!   implementation lives, so the registry can be driven by a mock in tests.

pub mod registry;
pub mod store;
pub mod transport;

pub use registry::{AcquireOutcome, ReleaseOutcome, SubscriptionRegistry};
pub use store::NotificationStore;
pub use transport::{PushHandler, RealtimeTransport, TransportError};
