use jobbell_bridge::notification::Notification;

/// Callback invoked for every notification delivered over the connection.
///
/// The handler is attached by the [`crate::SubscriptionRegistry`] and may be
/// called from whatever task the transport runs its receive loop on.
pub type PushHandler = Box<dyn FnMut(Notification) + Send + 'static>;

/// Errors that can occur while operating the real-time transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured stream endpoint is not a valid URL.
    #[error("invalid realtime endpoint: {0}")]
    Endpoint(String),
    /// The connection could not be opened.
    #[error("failed to open realtime connection: {0}")]
    Start(String),
    /// An established connection broke while receiving.
    #[error("realtime stream failed: {0}")]
    Stream(String),
}

/// The persistent push connection to the server, for one user identity at a
/// time.
///
/// Implementations own the connection session itself; the decision of when
/// a session exists belongs exclusively to the
/// [`crate::SubscriptionRegistry`]. Delivery of inbound events goes through
/// the handler given to [`RealtimeTransport::attach`]; with no handler
/// attached, received events are dropped.
pub trait RealtimeTransport: Send {
    /// Open the connection for the given user identity. Any previous
    /// session is replaced.
    fn start(&mut self, identity: &str) -> Result<(), TransportError>;

    /// Close the connection. Stopping an idle transport is a no-op.
    fn stop(&mut self);

    /// Attach the handler that receives pushed notifications.
    fn attach(&mut self, handler: PushHandler);

    /// Detach the current handler, if any.
    fn detach(&mut self);
}
