//! Blocking user alerts.

/// Surface that shows a blocking alert to the user.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = %message, "Alert raised");
        eprintln!("! {}", message);
    }
}
