use std::sync::Arc;

use crate::notice::Notice;

/// Sink for notices produced by catalog operations.
///
/// Delivery is simulated, so notifying is infallible and returns nothing.
/// Implementations must be `Send + Sync` so a notifier can be shared behind an
/// `Arc`.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);

    fn notify_all(&self, notices: &[Notice]) {
        for notice in notices {
            self.notify(notice);
        }
    }
}

impl<N> Notifier for Arc<N>
where
    N: Notifier + ?Sized,
{
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}

impl<N> Notifier for &N
where
    N: Notifier + ?Sized,
{
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}
