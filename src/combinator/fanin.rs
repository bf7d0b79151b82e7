// src/combinator/fanin.rs

//! Shared bookkeeping for one `all` call.
//!
//! This is plain synchronous state: it has no knowledge of tasks or
//! runtimes, so the ordering and single-resolution rules are unit tested
//! directly, without Tokio.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use crate::outcome::{ok, pass_err, Outcome};

pub(crate) type Shared<T, C, D> = Arc<Mutex<FanIn<T, C, D>>>;

/// Per-call state: slot buffer, completion count and the output sender.
///
/// `settle` doubles as the "already resolved" guard: once it has been taken
/// every further completion is ignored.
#[derive(Debug)]
pub(crate) struct FanIn<T, C, D> {
    slots: Vec<Option<T>>,
    completed: usize,
    settle: Option<oneshot::Sender<Outcome<Vec<T>, C, D>>>,
    abandoned: Option<usize>,
}

impl<T, C, D> FanIn<T, C, D> {
    pub(crate) fn new(len: usize) -> (Self, oneshot::Receiver<Outcome<Vec<T>, C, D>>) {
        let (tx, rx) = oneshot::channel();
        let mut fan = Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
            completed: 0,
            settle: Some(tx),
            abandoned: None,
        };

        // Nothing will ever complete, so the count condition holds already.
        if len == 0 {
            fan.resolve(ok(Vec::new()));
        }

        (fan, rx)
    }

    pub(crate) fn is_resolved(&self) -> bool {
        self.settle.is_none()
    }

    pub(crate) fn abandoned(&self) -> Option<usize> {
        self.abandoned
    }

    /// Apply the outcome of input `index`.
    pub(crate) fn record(&mut self, index: usize, outcome: Outcome<T, C, D>) {
        if self.is_resolved() {
            trace!(index, success = outcome.is_ok(), "late completion ignored");
            return;
        }

        match outcome {
            Err(failure) => {
                debug!(index, "input failed; resolving early");
                self.resolve(pass_err(failure));
            }
            Ok(value) => {
                self.slots[index] = Some(value);
                self.completed += 1;

                if self.completed == self.slots.len() {
                    let values: Vec<T> = self.slots.iter_mut().filter_map(Option::take).collect();
                    debug_assert_eq!(values.len(), self.completed);
                    debug!(count = values.len(), "all inputs succeeded");
                    self.resolve(ok(values));
                }
            }
        }
    }

    /// Input `index` went away without an outcome. Closes the output so the
    /// waiter can report it.
    pub(crate) fn abandon(&mut self, index: usize) {
        if self.is_resolved() {
            return;
        }
        warn!(index, "input ended without producing an outcome");
        self.abandoned = Some(index);
        self.settle = None;
    }

    fn resolve(&mut self, outcome: Outcome<Vec<T>, C, D>) {
        if let Some(tx) = self.settle.take() {
            if tx.send(outcome).is_err() {
                trace!("output dropped before resolution; outcome discarded");
            }
        }
    }
}

pub(crate) fn lock<T, C, D>(shared: &Shared<T, C, D>) -> MutexGuard<'_, FanIn<T, C, D>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle owned by one spawned input. Settles its slot exactly once; if the
/// input is dropped first (it panicked, or the runtime shut down) the slot is
/// marked abandoned instead.
pub(crate) struct SlotGuard<T, C, D> {
    index: usize,
    shared: Shared<T, C, D>,
    settled: bool,
}

impl<T, C, D> SlotGuard<T, C, D> {
    pub(crate) fn new(index: usize, shared: Shared<T, C, D>) -> Self {
        Self {
            index,
            shared,
            settled: false,
        }
    }

    pub(crate) fn settle(mut self, outcome: Outcome<T, C, D>) {
        self.settled = true;
        lock(&self.shared).record(self.index, outcome);
    }
}

impl<T, C, D> Drop for SlotGuard<T, C, D> {
    fn drop(&mut self) {
        if !self.settled {
            lock(&self.shared).abandon(self.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::oneshot::error::TryRecvError;

    use super::*;
    use crate::outcome::err;

    type Fan = FanIn<u32, &'static str, ()>;

    #[test]
    fn zero_inputs_resolve_immediately() {
        let (fan, mut rx) = Fan::new(0);
        assert!(fan.is_resolved());
        assert_eq!(rx.try_recv().unwrap().unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn values_land_in_input_order() {
        let (mut fan, mut rx) = Fan::new(3);

        fan.record(2, ok(30));
        fan.record(0, ok(10));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

        fan.record(1, ok(20));
        assert_eq!(rx.try_recv().unwrap().unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn first_failure_resolves_and_later_ones_are_ignored() {
        let (mut fan, mut rx) = Fan::new(3);

        fan.record(1, ok(1));
        fan.record(2, err("FIRST"));
        assert!(fan.is_resolved());

        fan.record(0, err("SECOND"));
        fan.record(0, ok(0));

        let failure = rx.try_recv().unwrap().unwrap_err();
        assert_eq!(*failure.code(), "FIRST");
    }

    #[test]
    fn failure_is_forwarded_not_rebuilt() {
        let (mut fan, mut rx) = Fan::new(1);
        let original = err::<u32, _, ()>("ORIG").unwrap_err();

        fan.record(0, Err(original.clone()));
        let forwarded = rx.try_recv().unwrap().unwrap_err();

        assert!(forwarded.same_as(&original));
    }

    #[test]
    fn dropped_receiver_is_tolerated() {
        let (mut fan, rx) = Fan::new(1);
        drop(rx);
        fan.record(0, ok(5));
        assert!(fan.is_resolved());
    }

    #[test]
    fn unsettled_guard_abandons_its_slot() {
        let (fan, mut rx) = Fan::new(2);
        let shared = Arc::new(Mutex::new(fan));

        SlotGuard::new(0, Arc::clone(&shared)).settle(ok(1));
        drop(SlotGuard::new(1, Arc::clone(&shared)));

        assert_eq!(lock(&shared).abandoned(), Some(1));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Closed)));
    }

    #[test]
    fn abandon_after_resolution_is_a_no_op() {
        let (fan, mut rx) = Fan::new(2);
        let shared = Arc::new(Mutex::new(fan));

        SlotGuard::new(0, Arc::clone(&shared)).settle(err("EARLY"));
        drop(SlotGuard::new(1, Arc::clone(&shared)));

        assert_eq!(lock(&shared).abandoned(), None);
        assert_eq!(*rx.try_recv().unwrap().unwrap_err().code(), "EARLY");
    }
}
