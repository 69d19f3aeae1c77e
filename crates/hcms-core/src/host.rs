//! Capabilities the hosting surface provides to page controllers.

use crate::route::Location;

/// Moves the browsing context to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: Location);
}

/// Shows blocking, user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);

    /// Asks a yes/no question. Hosts without a way to ask accept.
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}
