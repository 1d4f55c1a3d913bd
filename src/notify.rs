/// Severity of a user-facing notification, the same split the backend's web
/// UI makes between its green and red toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Where transient success/error messages go. Rendering (toast, status bar,
/// plain terminal line) is entirely the implementor's concern, including how
/// long a message stays visible.
pub trait NotificationSink {
    fn notify(&self, kind: NotificationKind, message: &str);
}

/// Prints notifications as plain lines on stdout/stderr.
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => println!("{}", message),
            NotificationKind::Error => eprintln!("error: {}", message),
        }
    }
}
