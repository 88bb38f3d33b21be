//! Single-resolution completion signals

use tokio::sync::watch;

/// A value that becomes available exactly once.
///
/// Cloning a signal yields another observer of the same completion. Signals
/// are never rejected; a signal whose producer is gone without fulfilling it
/// resolves to `None` from [`Signal::wait`].
#[derive(Debug, Clone)]
pub struct Signal<T> {
    rx: watch::Receiver<Option<T>>,
}

/// Producing half, owned by the modal record.
#[derive(Debug)]
pub(crate) struct SignalSender<T> {
    tx: watch::Sender<Option<T>>,
}

pub(crate) fn signal<T>() -> (SignalSender<T>, Signal<T>) {
    let (tx, rx) = watch::channel(None);
    (SignalSender { tx }, Signal { rx })
}

impl<T> SignalSender<T> {
    /// Fulfil the signal. Later calls are ignored and return `false`.
    pub(crate) fn fulfill(&self, value: T) -> bool {
        let mut value = Some(value);
        self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = value.take();
            true
        })
    }
}

impl<T: Clone> Signal<T> {
    /// Current value, if fulfilled.
    pub fn get(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Wait until the signal is fulfilled.
    ///
    /// Returns `None` only if the producing record was dropped without
    /// fulfilling the signal.
    pub async fn wait(&self) -> Option<T> {
        let mut rx = self.rx.clone();
        let value = rx.wait_for(Option::is_some).await.ok()?;
        value.clone()
    }
}
