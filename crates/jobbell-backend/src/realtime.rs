//! Server-sent-events implementation of the real-time transport.
//!
//! The connection is a single long-lived streamed HTTP response. Each SSE
//! event carries one notification as JSON on its `data:` lines; complete
//! events are framed out of the byte stream and handed to the push handler
//! attached by the subscription registry. There is no automatic reconnect:
//! when the stream ends or fails, the backend reports a disconnected state
//! and waits for the registry to start a fresh session.

use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use jobbell_bridge::{MessageFromBackend, connection::ConnectionState, notification::Notification};
use jobbell_live::transport::{PushHandler, RealtimeTransport, TransportError};
use tokio::{sync::mpsc::Sender, task::JoinHandle};

type SharedHandler = Arc<Mutex<Option<PushHandler>>>;

pub struct SseTransport {
    client: reqwest::Client,
    endpoint: String,
    events_tx: Sender<MessageFromBackend>,
    handler: SharedHandler,
    task: Option<JoinHandle<()>>,
}

impl SseTransport {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        events_tx: Sender<MessageFromBackend>,
    ) -> Self {
        Self {
            client,
            endpoint,
            events_tx,
            handler: Arc::new(Mutex::new(None)),
            task: None,
        }
    }

    fn stream_url(&self, identity: &str) -> Result<reqwest::Url, TransportError> {
        let mut url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| TransportError::Endpoint(e.to_string()))?;
        url.query_pairs_mut().append_pair("user", identity);
        Ok(url)
    }
}

impl RealtimeTransport for SseTransport {
    fn start(&mut self, identity: &str) -> Result<(), TransportError> {
        self.stop();

        let url = self.stream_url(identity)?;
        let client = self.client.clone();
        let handler = self.handler.clone();
        let events_tx = self.events_tx.clone();

        self.task = Some(tokio::spawn(async move {
            match run_stream(client, url, handler).await {
                Ok(()) => log::info!("Notification stream closed by server"),
                Err(error) => log::error!("Notification stream failed: {error}"),
            }
            if events_tx
                .try_send(MessageFromBackend::ConnectionStateUpdate(
                    ConnectionState::Disconnected,
                ))
                .is_err()
            {
                log::warn!("Could not report disconnected state: frontend bridge unavailable");
            }
        }));
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn attach(&mut self, handler: PushHandler) {
        *self.handler.lock().expect("push handler lock poisoned") = Some(handler);
    }

    fn detach(&mut self) {
        self.handler
            .lock()
            .expect("push handler lock poisoned")
            .take();
    }
}

async fn run_stream(
    client: reqwest::Client,
    url: reqwest::Url,
    handler: SharedHandler,
) -> Result<(), TransportError> {
    let response = client
        .get(url)
        .header("Accept", "text/event-stream")
        .send()
        .await
        .map_err(|e| TransportError::Start(e.to_string()))?
        .error_for_status()
        .map_err(|e| TransportError::Start(e.to_string()))?;

    let mut stream = response.bytes_stream();
    let mut buffer = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| TransportError::Stream(e.to_string()))?;
        // CR is insignificant in SSE framing and cannot appear unescaped
        // inside the JSON payloads.
        buffer.push_str(&String::from_utf8_lossy(&chunk).replace('\r', ""));

        for payload in drain_events(&mut buffer) {
            match serde_json::from_str::<Notification>(&payload) {
                Ok(notification) => {
                    let mut handler = handler.lock().expect("push handler lock poisoned");
                    if let Some(handler) = handler.as_mut() {
                        handler(notification);
                    }
                }
                Err(error) => log::warn!("Ignoring malformed push event: {error}"),
            }
        }
    }

    Ok(())
}

/// Splits complete events off the front of `buffer` and returns their data
/// payloads. Incomplete trailing input stays buffered; events without data
/// lines (comments, keep-alives) are skipped.
fn drain_events(buffer: &mut String) -> Vec<String> {
    let mut payloads = Vec::new();
    while let Some(boundary) = buffer.find("\n\n") {
        let event: String = buffer.drain(..boundary + 2).collect();

        let mut data_lines = Vec::new();
        for line in event.lines() {
            if let Some(rest) = line.strip_prefix("data:") {
                data_lines.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
            }
        }
        if !data_lines.is_empty() {
            payloads.push(data_lines.join("\n"));
        }
    }
    payloads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_a_complete_event() {
        let mut buffer = "data: {\"id\":1}\n\n".to_string();
        let payloads = drain_events(&mut buffer);
        assert_eq!(payloads, vec!["{\"id\":1}"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn keeps_incomplete_input_buffered() {
        let mut buffer = "data: {\"id\":1}\n\ndata: {\"id".to_string();
        let payloads = drain_events(&mut buffer);
        assert_eq!(payloads, vec!["{\"id\":1}"]);
        assert_eq!(buffer, "data: {\"id");

        buffer.push_str("\":2}\n\n");
        assert_eq!(drain_events(&mut buffer), vec!["{\"id\":2}"]);
    }

    #[test]
    fn skips_comments_and_keep_alives() {
        let mut buffer = ": keep-alive\n\nevent: ping\n\ndata: {}\n\n".to_string();
        assert_eq!(drain_events(&mut buffer), vec!["{}"]);
    }

    #[test]
    fn joins_multi_line_data() {
        let mut buffer = "data: {\"id\":\ndata: 3}\n\n".to_string();
        assert_eq!(drain_events(&mut buffer), vec!["{\"id\":\n3}"]);
    }
}
