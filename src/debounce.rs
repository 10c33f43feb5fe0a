//! Cancellable timers and a debouncer built on them.
//!
//! In the browser a [`TimeoutScheduler`] backs the timers with
//! `gloo_timers::callback::Timeout`; tests drive a scheduler by hand.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;

/// Runs a task once after a delay, returning a handle that can cancel it.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;

    /// Prevent a pending task from running. Cancelling a task that already
    /// ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn cancel(&self, handle: Timeout) {
        // Dropping the returned closure releases the JS callback.
        drop(handle.cancel());
    }
}

/// Collapses bursts of calls into one: only the last task scheduled within
/// `delay_ms` of quiet time runs.
pub struct Debouncer<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: RefCell<Option<S::Handle>>,
}

impl<S: Scheduler> Debouncer<S> {
    pub fn new(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// Schedule `task`, cancelling whatever was pending.
    pub fn call<F: FnOnce() + 'static>(&self, task: F) {
        self.cancel();
        let handle = self.scheduler.schedule(self.delay_ms, Box::new(task));
        *self.pending.borrow_mut() = Some(handle);
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for Debouncer<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::Scheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Task = Box<dyn FnOnce()>;

    /// Scheduler whose tasks run only when the test calls [`ManualScheduler::fire`].
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        slots: Rc<RefCell<Vec<Option<(u32, Task)>>>>,
    }

    impl ManualScheduler {
        pub fn pending(&self) -> usize {
            self.slots.borrow().iter().filter(|s| s.is_some()).count()
        }

        pub fn last_delay(&self) -> Option<u32> {
            self.slots
                .borrow()
                .iter()
                .rev()
                .flatten()
                .map(|(delay, _)| *delay)
                .next()
        }

        /// Run every task still pending, in scheduling order.
        pub fn fire(&self) {
            let tasks: Vec<Task> = self
                .slots
                .borrow_mut()
                .iter_mut()
                .filter_map(Option::take)
                .map(|(_, task)| task)
                .collect();
            for task in tasks {
                task();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = usize;

        fn schedule(&self, delay_ms: u32, task: Task) -> usize {
            let mut slots = self.slots.borrow_mut();
            slots.push(Some((delay_ms, task)));
            slots.len() - 1
        }

        fn cancel(&self, handle: usize) {
            if let Some(slot) = self.slots.borrow_mut().get_mut(handle) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn only_the_latest_call_runs() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), 100);
        let ran = Rc::new(RefCell::new(Vec::new()));

        for value in ["t", "to", "tou"] {
            let ran = Rc::clone(&ran);
            debouncer.call(move || ran.borrow_mut().push(value));
        }
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.last_delay(), Some(100));

        scheduler.fire();
        assert_eq!(*ran.borrow(), vec!["tou"]);
    }

    #[test]
    fn cancel_discards_pending_task() {
        let scheduler = ManualScheduler::default();
        let debouncer = Debouncer::new(scheduler.clone(), 100);
        let ran = Rc::new(RefCell::new(false));
        {
            let ran = Rc::clone(&ran);
            debouncer.call(move || *ran.borrow_mut() = true);
        }
        debouncer.cancel();
        scheduler.fire();
        assert!(!*ran.borrow());
    }

    #[test]
    fn dropping_debouncer_cancels_pending_task() {
        let scheduler = ManualScheduler::default();
        {
            let debouncer = Debouncer::new(scheduler.clone(), 100);
            debouncer.call(|| panic!("task outlived its debouncer"));
        }
        assert_eq!(scheduler.pending(), 0);
        scheduler.fire();
    }
}
