//! # Store
//!
//! The single state container. State lives in an immutable [`AppState`]
//! snapshot; [`Store::dispatch`] runs the pure [`reduce`] function against the
//! current snapshot, swaps the result in and notifies subscribers.
//!
//! ## Guarantees
//!
//! - Dispatches are serialised. Each one is applied and fully notified before
//!   the next begins, including dispatches from other threads.
//! - Listeners run in subscription order, once per dispatch.
//! - Snapshots handed out are never mutated; holding one is always safe.
//!
//! ## Example
//!
//! ```rust
//! use mlfund_core::store::{Action, Store, Theme};
//!
//! let store = Store::new();
//! let subscription = store.subscribe(|state| println!("theme is now {}", state.ui.theme));
//!
//! let snapshot = store.dispatch(Action::set_theme(Theme::Dark));
//! assert_eq!(snapshot.ui.theme, Theme::Dark);
//!
//! subscription.unsubscribe();
//! ```
//!
//! A listener may itself dispatch. That action is queued and applied once
//! every listener has seen the current snapshot, so notifications are never
//! interleaved.

mod action;
mod companies;
pub mod selectors;
mod state;
mod ui;

pub use action::{Action, CompaniesAction, FetchMeta, Lifecycle, ResourceKey, UiAction};
pub use companies::{reduce_companies, CompaniesState, FetchStatus, ResourceState};
pub use state::{reduce, AppState};
pub use ui::{reduce_ui, Theme, UiState};

use std::collections::{BTreeMap, VecDeque};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use std::thread::{self, ThreadId};

/// Immutable view of the store at one point in time.
pub type Snapshot = Arc<AppState>;

type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Marks the thread delivering notifications; cleared even if a listener
/// panics.
struct NotifyingGuard<'a> {
    owner: &'a Mutex<Option<ThreadId>>,
}

impl<'a> NotifyingGuard<'a> {
    fn enter(owner: &'a Mutex<Option<ThreadId>>) -> Self {
        *owner.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread::current().id());
        Self { owner }
    }
}

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        *self.owner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

/// The application state container.
pub struct Store {
    current: RwLock<Snapshot>,
    dispatch_lock: Mutex<()>,
    notifying: Mutex<Option<ThreadId>>,
    queued: Mutex<VecDeque<Action>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.get_state())
            .finish_non_exhaustive()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Start from a preloaded state instead of the defaults.
    pub fn with_state(state: AppState) -> Self {
        Self {
            current: RwLock::new(Arc::new(state)),
            dispatch_lock: Mutex::new(()),
            notifying: Mutex::new(None),
            queued: Mutex::new(VecDeque::new()),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Current snapshot.
    pub fn get_state(&self) -> Snapshot {
        let current = self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*current)
    }

    /// Apply `action` and return the resulting snapshot.
    ///
    /// Called from inside a listener, the action is queued behind the
    /// notification in progress and the snapshot being delivered is returned;
    /// the outer `dispatch` returns the state after the queue has drained.
    pub fn dispatch(&self, action: impl Into<Action>) -> Snapshot {
        let action = action.into();
        if self.is_notifying_here() {
            log::debug!("queued {action} raised by a listener");
            self.enqueue(action);
            return self.get_state();
        }

        let _serial = self
            .dispatch_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.enqueue(action);
        let mut latest = self.get_state();
        while let Some(next) = self.dequeue() {
            latest = self.apply(&next);
        }
        latest
    }

    fn apply(&self, action: &Action) -> Snapshot {
        let next = Arc::new(reduce(&self.get_state(), action));
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
        log::debug!("dispatched {action}");

        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .values()
            .cloned()
            .collect();

        let _notifying = NotifyingGuard::enter(&self.notifying);
        for listener in &listeners {
            listener(&next);
        }

        next
    }

    fn is_notifying_here(&self) -> bool {
        *self.notifying.lock().unwrap_or_else(PoisonError::into_inner)
            == Some(thread::current().id())
    }

    fn enqueue(&self, action: Action) {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(action);
    }

    fn dequeue(&self) -> Option<Action> {
        self.queued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Register `listener`; it runs after every completed dispatch.
    pub fn subscribe<F>(&self, listener: F) -> Unsubscribe
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, Arc::new(listener));

        Unsubscribe {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[must_use = "dropping the handle leaves the listener subscribed forever"]
pub struct Unsubscribe {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Unsubscribe {
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entries
                .remove(&self.id);
        }
    }
}

impl Debug for Unsubscribe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unsubscribe").field("id", &self.id).finish()
    }
}
