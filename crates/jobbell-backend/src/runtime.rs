//! Backend runtime setup and orchestration.
//!
//! This module wires together configuration, shared state, and the message
//! dispatch loop that listens to frontend bridge requests.

use std::{sync::Arc, thread};

use jobbell_bridge::{MessageFromBackend, MessageToBackend};
use jobbell_live::SubscriptionRegistry;
use tokio::sync::{
    RwLock,
    mpsc::{Receiver, Sender},
};

use crate::api::ApiClient;
use crate::app::AppContext;
use crate::realtime::SseTransport;
use crate::state::State;

/// Initialize backend state and start processing frontend messages.
async fn setup_backend(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    let config = crate::config::load_config()
        .await
        .expect("failed to load config");

    let request_client = reqwest::Client::new();
    let api = ApiClient::new(request_client.clone(), &config.api_config)
        .expect("failed to build API client");
    let transport = SseTransport::new(
        request_client,
        config.api_config.realtime_url.clone(),
        tx.clone(),
    );

    let state = Arc::new(RwLock::new(State {
        config,
        api,
        registry: SubscriptionRegistry::new(transport),
    }));

    let context = Arc::new(AppContext { state, tx });
    context.consume_bridge_messages(rx).await;
}

/// Spawn the backend runtime and begin processing bridge messages.
pub fn run(rx: Receiver<MessageToBackend>, tx: Sender<MessageFromBackend>) {
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime");
        runtime.block_on(async { setup_backend(rx, tx).await });
    });
}
