//! Console notifier: prints notices the way the store talks to its customers.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use crate::notice::Notice;
use crate::notifier::Notifier;

/// Writes each notice as text to a writer (stdout by default) and records a
/// `tracing` event for it.
#[derive(Debug)]
pub struct ConsoleNotifier<W = Stdout> {
    out: Mutex<W>,
}

impl ConsoleNotifier<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleNotifier<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    /// Recover the writer (tests use a `Vec<u8>`).
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W> Notifier for ConsoleNotifier<W>
where
    W: Write + Send,
{
    fn notify(&self, notice: &Notice) {
        tracing::info!(notice = notice.kind(), "{notice}");

        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(out, "{notice}").and_then(|_| out.flush()) {
            tracing::warn!("failed to write notice to console: {err}");
        }
    }
}
