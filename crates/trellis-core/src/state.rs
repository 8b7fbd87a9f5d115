use crate::collections::OrderedSet;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Identity of an observable value created by a [`StateRuntime`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Receives the identity of every observable value read through it.
///
/// Measure and placement scopes implement this so that a node's dependencies are
/// recorded per phase while its measure block or placement block runs.
pub trait ReadObserver {
    fn record_read(&mut self, state: StateId);
}

type PendingCallback = Rc<dyn Fn()>;

struct RuntimeInner {
    next_id: Cell<usize>,
    changed: RefCell<OrderedSet<StateId>>,
    on_changes_pending: RefCell<Option<PendingCallback>>,
}

/// Owner of observable values and of the coalesced set of values changed since the
/// last layout pass.
#[derive(Clone)]
pub struct StateRuntime {
    inner: Rc<RuntimeInner>,
}

impl StateRuntime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                next_id: Cell::new(0),
                changed: RefCell::new(OrderedSet::default()),
                on_changes_pending: RefCell::new(None),
            }),
        }
    }

    /// Creates a new observable value owned by this runtime.
    pub fn mutable_state_of<T: Clone + 'static>(&self, value: T) -> MutableState<T> {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        MutableState {
            id: StateId(id),
            value: Rc::new(RefCell::new(value)),
            runtime: self.clone(),
        }
    }

    /// Installs a callback invoked once whenever the change set goes from empty to
    /// non-empty, i.e. once per batch of writes that needs a new pass.
    pub fn set_on_changes_pending(&self, callback: impl Fn() + 'static) {
        *self.inner.on_changes_pending.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.inner.changed.borrow().is_empty()
    }

    /// Drains the values changed since the previous call, in first-write order.
    pub fn take_changes(&self) -> Vec<StateId> {
        self.inner.changed.borrow_mut().drain(..).collect()
    }

    fn mark_changed(&self, id: StateId) {
        let first_in_batch = {
            let mut changed = self.inner.changed.borrow_mut();
            let was_empty = changed.is_empty();
            changed.insert(id);
            was_empty
        };
        if first_in_batch {
            log::trace!("{:?} opened a change batch", id);
            let callback = self.inner.on_changes_pending.borrow().clone();
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRuntime")
            .field("allocated", &self.inner.next_id.get())
            .field("pending", &self.inner.changed.borrow().len())
            .finish()
    }
}

/// Observable value. Reads through a [`ReadObserver`] register a dependency and
/// writes schedule the dependents for the next pass.
pub struct MutableState<T: Clone + 'static> {
    id: StateId,
    value: Rc<RefCell<T>>,
    runtime: StateRuntime,
}

impl<T: Clone + 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Rc::clone(&self.value),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Returns the current value and records the read on `observer`.
    pub fn get<O: ReadObserver + ?Sized>(&self, observer: &mut O) -> T {
        observer.record_read(self.id);
        self.value.borrow().clone()
    }

    /// Borrows the current value and records the read on `observer`.
    pub fn with<O: ReadObserver + ?Sized, R>(
        &self,
        observer: &mut O,
        f: impl FnOnce(&T) -> R,
    ) -> R {
        observer.record_read(self.id);
        f(&self.value.borrow())
    }

    /// Returns the current value without creating a dependency.
    pub fn get_untracked(&self) -> T {
        self.value.borrow().clone()
    }

    /// Mutates the value in place. Always counts as a change.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.borrow_mut());
        self.runtime.mark_changed(self.id);
        result
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    /// Replaces the value. Writing an equal value is not a change.
    pub fn set(&self, value: T) {
        {
            let mut current = self.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }
        self.runtime.mark_changed(self.id);
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for MutableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableState")
            .field("id", &self.id)
            .field("value", &*self.value.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
