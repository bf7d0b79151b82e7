//! Manually settled inputs, for scripting completion order in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use returnit::{Outcome, Pending};
use tokio::sync::oneshot;

/// The test's end of a gated input: decides when and how it completes.
pub struct Gate<T, C, D> {
    tx: oneshot::Sender<Outcome<T, C, D>>,
}

impl<T, C, D> Gate<T, C, D> {
    /// Let the input finish with `outcome`.
    ///
    /// Returns `false` if the input future is gone (never started or dropped).
    pub fn release(self, outcome: Outcome<T, C, D>) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

/// Counts how many gated inputs ran to completion, to observe that siblings
/// are not cancelled.
#[derive(Clone, Default)]
pub struct Gated {
    finished: Arc<AtomicUsize>,
}

impl Gated {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    /// A pending input that completes only when its [`Gate`] is released.
    ///
    /// If the gate is dropped unreleased, the input never completes.
    pub fn input<T, C, D>(&self) -> (Gate<T, C, D>, Pending<T, C, D>)
    where
        T: Send + 'static,
        C: Send + Sync + 'static,
        D: Send + Sync + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let finished = Arc::clone(&self.finished);
        let input: Pending<T, C, D> = Box::pin(async move {
            let outcome = match rx.await {
                Ok(outcome) => outcome,
                Err(_) => std::future::pending().await,
            };
            finished.fetch_add(1, Ordering::SeqCst);
            outcome
        });
        (Gate { tx }, input)
    }
}

/// Shorthand for a single gated input without a shared counter.
pub fn gate<T, C, D>() -> (Gate<T, C, D>, Pending<T, C, D>)
where
    T: Send + 'static,
    C: Send + Sync + 'static,
    D: Send + Sync + 'static,
{
    Gated::new().input()
}
