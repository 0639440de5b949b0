/// Severity or category for transient user-visible notices.
///
/// This enum classifies notices by their intent and visual styling,
/// allowing the UI to display them appropriately.
#[derive(Debug, Clone)]
pub enum NoticeLevel {
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Error,
}

/// A transient notice (toast) payload intended for the user interface.
///
/// Not to be confused with [`crate::notification::Notification`], which is a
/// persistent server-side entity; a notice only exists to surface a local,
/// short-lived message such as a failed fetch.
#[derive(Debug, Clone)]
pub struct Notice {
    /// The level of the notice, determining its visual style.
    pub level: NoticeLevel,
    /// The text content to display to the user.
    pub message: String,
}
