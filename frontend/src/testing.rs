//! Host-side doubles: a clock that only moves when told to and a surface
//! that records every write.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::surface::Surface;
use crate::timer::{Scheduler, Task};

struct Pending {
    id: u64,
    due: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Move time forward, running every task that falls due on the way in
    /// due order. Tasks scheduled by running tasks are picked up too.
    pub fn advance(&self, ms: u64) {
        let end = self.now() + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let idx = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= end)
                    .min_by_key(|(_, p)| (p.due, p.id))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let p = clock.pending.remove(i);
                        clock.now = p.due;
                        Some(p.task)
                    }
                    None => {
                        clock.now = end;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule(&self, delay_ms: u32, task: Task) -> u64 {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + u64::from(delay_ms);
        clock.pending.push(Pending { id, due, task });
        id
    }

    fn cancel(&self, handle: u64) {
        self.clock.borrow_mut().pending.retain(|p| p.id != handle);
    }

    fn spawn(&self, delay_ms: u32, task: Task) {
        self.schedule(delay_ms, task);
    }
}

#[derive(Default)]
pub struct FakeSurface {
    pub styles: RefCell<BTreeMap<String, String>>,
    pub texts: RefCell<Vec<String>>,
    pub classes: RefCell<BTreeSet<String>>,
    pub attrs: RefCell<BTreeMap<String, String>>,
    pub writes: Cell<usize>,
}

impl FakeSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    pub fn text(&self) -> Option<String> {
        self.texts.borrow().last().cloned()
    }

    fn bump(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl Surface for FakeSurface {
    fn set_style(&self, property: &str, value: &str) {
        self.bump();
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn set_text(&self, text: &str) {
        self.bump();
        self.texts.borrow_mut().push(text.to_string());
    }

    fn add_class(&self, class: &str) {
        self.bump();
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.bump();
        self.classes.borrow_mut().remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs.borrow().get(name).cloned()
    }

    fn set_attr(&self, name: &str, value: &str) {
        self.bump();
        self.attrs
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attr(&self, name: &str) {
        self.bump();
        self.attrs.borrow_mut().remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn advance_runs_tasks_in_due_order_including_rescheduled_ones() {
        let sched = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        sched.spawn(30, Box::new(move || l.borrow_mut().push("b")));
        let l = log.clone();
        let s = sched.clone();
        sched.spawn(10, Box::new(move || {
            l.borrow_mut().push("a");
            let l = l.clone();
            s.spawn(5, Box::new(move || l.borrow_mut().push("a2")));
        }));

        sched.advance(100);
        assert_eq!(*log.borrow(), vec!["a", "a2", "b"]);
        assert_eq!(sched.now(), 100);
        assert_eq!(sched.pending(), 0);
    }
}
