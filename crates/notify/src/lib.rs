//! Notification stubs.
//!
//! Shipping and e-mail delivery are simulated: a purchase produces [`Notice`]s and
//! a [`Notifier`] renders them. Nothing here can fail or return a value.

pub mod console;
pub mod notice;
pub mod notifier;
pub mod recording;

pub use console::ConsoleNotifier;
pub use notice::Notice;
pub use notifier::Notifier;
pub use recording::RecordingNotifier;
