/// State of the persistent real-time connection, as surfaced to the UI.
///
/// The backend reports transitions over the bridge so the dropdown can show
/// a disconnected indicator. There is no automatic reconnect; a manual
/// refresh re-triggers the pull-fetch path only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// The real-time connection is up and push events are flowing.
    Connected,
    /// No real-time connection is active.
    #[default]
    Disconnected,
}
