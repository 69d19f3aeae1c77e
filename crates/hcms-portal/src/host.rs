//! Terminal implementations of the host capabilities.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use hcms_core::host::{Navigator, Notifier};
use hcms_core::route::Location;

/// Queues navigations; the REPL mounts the next page once the current
/// event has been handled.
pub struct TerminalNavigator {
    tx: UnboundedSender<Location>,
}

impl TerminalNavigator {
    pub fn channel() -> (Self, UnboundedReceiver<Location>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, location: Location) {
        if self.tx.send(location).is_err() {
            tracing::warn!("Navigation requested after the REPL stopped");
        }
    }
}

/// Prints notices and asks confirmations on stdin.
#[derive(Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("{}", format!("! {}", message).bright_yellow());
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{} ", format!("? {} [y/N]", message).bright_yellow());
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcms_core::route::Page;

    #[test]
    fn test_navigations_are_queued_in_order() {
        let (navigator, mut rx) = TerminalNavigator::channel();
        navigator.navigate(Location::new(Page::Landing));
        navigator.navigate(Location::new(Page::AdminDashboard));

        assert_eq!(rx.try_recv().unwrap().page, Page::Landing);
        assert_eq!(rx.try_recv().unwrap().page, Page::AdminDashboard);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_confirmation_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }
}
