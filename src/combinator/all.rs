// src/combinator/all.rs

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::debug;

use super::fanin::{lock, FanIn, Shared, SlotGuard};
use crate::outcome::Outcome;

/// Future returned by [`all`] and [`all_local`].
///
/// Resolves to `Ok(values)` in input order once every input has succeeded, or
/// to the first failure observed, forwarded unchanged. Dropping it does not
/// cancel the inputs.
#[must_use = "the combined outcome is only observed by awaiting `All`"]
pub struct All<T, C, D> {
    rx: oneshot::Receiver<Outcome<Vec<T>, C, D>>,
    shared: Shared<T, C, D>,
}

impl<T, C, D> fmt::Debug for All<T, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field("resolved", &lock(&self.shared).is_resolved())
            .finish_non_exhaustive()
    }
}

impl<T, C, D> Future for All<T, C, D> {
    type Output = Outcome<Vec<T>, C, D>;

    /// # Panics
    ///
    /// If an input task ended without producing an outcome (it panicked)
    /// before the combined outcome was decided.
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => {
                let abandoned = lock(&self.shared).abandoned();
                match abandoned {
                    Some(index) => {
                        panic!("input {index} of `all` ended without producing an outcome")
                    }
                    None => panic!("`all` lost its inputs without producing an outcome"),
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Shared state and one guard per input slot.
fn fan_out<T, C, D>(len: usize) -> (All<T, C, D>, Vec<SlotGuard<T, C, D>>) {
    let (fan, rx) = FanIn::new(len);
    let shared = Arc::new(Mutex::new(fan));
    let guards = (0..len)
        .map(|index| SlotGuard::new(index, Arc::clone(&shared)))
        .collect();
    (All { rx, shared }, guards)
}

/// Run every input as its own task and combine their outcomes.
///
/// Inputs start immediately, before the returned future is first polled.
/// If one fails the combined outcome is that failure, delivered as soon as it
/// is observed; the remaining inputs keep running and their outcomes are
/// discarded. When several fail, whichever is observed first wins. An empty
/// input list resolves to `Ok(vec![])`.
///
/// # Panics
///
/// Must be called from within a Tokio runtime.
pub fn all<I, F, T, C, D>(inputs: I) -> All<T, C, D>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T, C, D>> + Send + 'static,
    T: Send + 'static,
    C: Send + Sync + 'static,
    D: Send + Sync + 'static,
{
    let inputs: Vec<F> = inputs.into_iter().collect();
    debug!(count = inputs.len(), "fanning out inputs");

    let (all, guards) = fan_out(inputs.len());
    for (input, guard) in inputs.into_iter().zip(guards) {
        tokio::spawn(async move {
            guard.settle(input.await);
        });
    }
    all
}

/// [`all`] for `!Send` inputs, run as local tasks on the current thread.
///
/// # Panics
///
/// Must be called from within a [`tokio::task::LocalSet`].
pub fn all_local<I, F, T, C, D>(inputs: I) -> All<T, C, D>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Outcome<T, C, D>> + 'static,
    T: 'static,
    C: 'static,
    D: 'static,
{
    let inputs: Vec<F> = inputs.into_iter().collect();
    debug!(count = inputs.len(), "fanning out local inputs");

    let (all, guards) = fan_out(inputs.len());
    for (input, guard) in inputs.into_iter().zip(guards) {
        tokio::task::spawn_local(async move {
            guard.settle(input.await);
        });
    }
    all
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::outcome::{err, ok, Pending};

    async fn explode() -> Outcome<u8, &'static str> {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn empty_input_is_empty_success() {
        let inputs: Vec<Pending<u8>> = Vec::new();
        assert_eq!(all(inputs).await.unwrap(), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn successes_keep_input_order() {
        let inputs: Vec<Pending<u64, &str>> = vec![
            Box::pin(async {
                tokio::time::sleep(Duration::from_millis(30)).await;
                ok(1)
            }),
            Box::pin(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                ok(2)
            }),
            Box::pin(async { ok(3) }),
        ];

        assert_eq!(all(inputs).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn failure_does_not_wait_for_pending_siblings() {
        let inputs: Vec<Pending<u8, &str>> = vec![
            Box::pin(std::future::pending()),
            Box::pin(async { err("X") }),
        ];

        let outcome = tokio::time::timeout(Duration::from_secs(5), all(inputs))
            .await
            .expect("all waited for a pending input");
        assert_eq!(*outcome.unwrap_err().code(), "X");
    }

    #[tokio::test]
    async fn inputs_start_before_first_poll() {
        let (tx, rx) = oneshot::channel::<()>();
        let combined = all(vec![async move {
            let _ = tx.send(());
            ok::<_, &str, ()>(())
        }]);

        rx.await.expect("input never ran");
        assert!(combined.await.is_ok());
    }

    #[tokio::test]
    #[should_panic(expected = "input 1 of `all`")]
    async fn panicking_input_panics_the_waiter() {
        let inputs: Vec<Pending<u8, &str>> = vec![
            Box::pin(std::future::pending()),
            Box::pin(explode()),
        ];
        let _ = all(inputs).await;
    }

    #[tokio::test]
    async fn local_inputs_need_not_be_send() {
        use std::rc::Rc;

        let local = tokio::task::LocalSet::new();
        let values = local
            .run_until(async {
                let shared = Rc::new(5u32);
                let inputs = (0..3u32).map(|i| {
                    let shared = Rc::clone(&shared);
                    async move {
                        tokio::task::yield_now().await;
                        ok::<_, &str, ()>(*shared + i)
                    }
                });
                all_local(inputs).await
            })
            .await;

        assert_eq!(values.unwrap(), vec![5, 6, 7]);
    }
}
