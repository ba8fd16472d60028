//! Trailing-edge debounce for high-frequency events such as `scroll`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::timer::Scheduler;

/// Wrapped callable returned by [`debounce`].
///
/// Every [`Debounced::call`] drops whatever call is still waiting and queues
/// a new one `wait_ms` out, so a burst of calls runs `f` once with the last
/// arguments. Clones share the same pending slot.
pub struct Debounced<A, S: Scheduler> {
    scheduler: S,
    wait_ms: u32,
    f: Rc<dyn Fn(A)>,
    pending: Rc<RefCell<Option<S::Handle>>>,
}

pub fn debounce<A, S, F>(scheduler: S, wait_ms: u32, f: F) -> Debounced<A, S>
where
    A: 'static,
    S: Scheduler,
    F: Fn(A) + 'static,
{
    Debounced {
        scheduler,
        wait_ms,
        f: Rc::new(f),
        pending: Rc::new(RefCell::new(None)),
    }
}

impl<A: 'static, S: Scheduler> Debounced<A, S> {
    pub fn call(&self, args: A) {
        self.cancel();

        let f = self.f.clone();
        let pending = self.pending.clone();
        let handle = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || {
                // the slot still holds our own (already fired) handle
                pending.borrow_mut().take();
                f(args);
            }),
        );
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        let previous = self.pending.borrow_mut().take();
        if let Some(handle) = previous {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }
}

impl<A, S: Scheduler> Clone for Debounced<A, S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            wait_ms: self.wait_ms,
            f: self.f.clone(),
            pending: self.pending.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualScheduler;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn recorder() -> (Rc<RefCell<Vec<(u64, u32)>>>, ManualScheduler) {
        (Rc::new(RefCell::new(Vec::new())), ManualScheduler::new())
    }

    #[test]
    fn burst_runs_once_with_last_args() {
        let (calls, sched) = recorder();
        let c = calls.clone();
        let s = sched.clone();
        let d = debounce(sched.clone(), 10, move |v: u32| c.borrow_mut().push((s.now(), v)));

        for v in 0..5 {
            d.call(v);
            sched.advance(3);
        }
        assert!(d.is_pending());
        // last call happened at t=12, so the run lands at t=22
        sched.advance(20);

        assert_eq!(*calls.borrow(), vec![(22, 4)]);
        assert!(!d.is_pending());
    }

    #[test]
    fn quiet_gap_lets_each_call_through() {
        let (calls, sched) = recorder();
        let c = calls.clone();
        let d = debounce(sched.clone(), 10, move |v: u32| c.borrow_mut().push((0, v)));

        d.call(1);
        sched.advance(15);
        d.call(2);
        sched.advance(15);

        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(calls.borrow()[1].1, 2);
    }

    #[test]
    fn cancel_drops_pending_call() {
        let (calls, sched) = recorder();
        let c = calls.clone();
        let d = debounce(sched.clone(), 10, move |v: u32| c.borrow_mut().push((0, v)));

        d.call(7);
        d.cancel();
        sched.advance(50);

        assert!(calls.borrow().is_empty());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn clones_share_the_pending_slot() {
        let (calls, sched) = recorder();
        let c = calls.clone();
        let d = debounce(sched.clone(), 10, move |v: u32| c.borrow_mut().push((0, v)));
        let d2 = d.clone();

        d.call(1);
        d2.call(2);
        sched.advance(10);

        assert_eq!(*calls.borrow(), vec![(0, 2)]);
    }

    proptest! {
        #[test]
        fn rapid_calls_run_exactly_once(gaps in proptest::collection::vec(0u64..10, 1..40), wait in 10u32..50) {
            let (calls, sched) = recorder();
            let c = calls.clone();
            let s = sched.clone();
            let d = debounce(sched.clone(), wait, move |v: u32| c.borrow_mut().push((s.now(), v)));

            let mut last_at = 0;
            for (i, gap) in gaps.iter().enumerate() {
                sched.advance(*gap);
                last_at = sched.now();
                d.call(i as u32);
            }
            sched.advance(u64::from(wait) * 2);

            let calls = calls.borrow();
            prop_assert_eq!(calls.len(), 1);
            prop_assert_eq!(calls[0], (last_at + u64::from(wait), (gaps.len() - 1) as u32));
        }
    }
}
