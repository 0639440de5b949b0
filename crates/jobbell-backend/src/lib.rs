//! Backend runtime entry point and public API surface.
//!
//! This crate owns the backend lifecycle, routes bridge messages to services,
//! and manages shared state used by asynchronous tasks: the REST client, the
//! real-time notification transport, and the subscription registry that
//! shares one connection across all mounted consumers.

mod api;
mod app;
mod config;
mod realtime;
mod runtime;
mod services;
mod state;

pub use crate::runtime::run;
