use std::io::Write;

use crate::domain::Notifier;

// Terminal stand-in for the page's alert dialog: the message goes to stderr
// so it never mixes with rendered results on stdout.
#[derive(Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "alert shown.");
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = writeln!(stderr, "! {message}") {
            tracing::error!(error = %e, "failed to write alert.");
        }
    }
}
