//! Backend service handlers for frontend-driven requests.
//!
//! This module groups async request handlers that operate on the shared
//! `AppContext`, perform side effects (network calls, subscription registry
//! transitions), and emit events or notices back to the frontend.

pub mod notification_service;

/// Represents a type that is used in all handlers as an application context.
pub(crate) type AppContextHandle = std::sync::Arc<crate::app::AppContext>;
