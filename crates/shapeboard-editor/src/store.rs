//! Observable editor store.
//!
//! [`EditorStore`] owns the [`WorkspaceState`] and is the single entry point
//! for mutating it: the presentation layer dispatches [`Action`]s, reads
//! snapshots between events, and subscribes for change notification. Actions
//! that mutate document state mark it dirty and re-arm the debounced save;
//! teardown events flush synchronously so a reload never loses data.
//!
//! The model is single-threaded and event-driven: each dispatched action
//! runs to completion under the state lock, and the save scheduler's timer
//! callback takes the same lock, so persistence is serialized with
//! transitions.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use shapeboard_persistence::{DocumentStore, SaveScheduler, DEFAULT_SAVE_DELAY};

use crate::actions::Action;
use crate::input::{self, InputEvent};
use crate::workspace::WorkspaceState;

/// Subscription handle for unsubscribing from store notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

type Listener = Box<dyn Fn(&WorkspaceState) + Send>;

/// Observable store wrapping the workspace state machine.
pub struct EditorStore {
    state: Arc<Mutex<WorkspaceState>>,
    listeners: Arc<Mutex<HashMap<SubscriptionId, Listener>>>,
    scheduler: SaveScheduler,
}

impl EditorStore {
    /// Opens a store over the given storage backend with the default save
    /// debounce.
    pub fn open(storage: Arc<dyn DocumentStore>) -> Self {
        Self::with_debounce(storage, DEFAULT_SAVE_DELAY)
    }

    /// Opens a store with a custom debounce window.
    ///
    /// Persisted shapes are loaded up front; missing or unreadable data
    /// starts the editor empty rather than failing.
    pub fn with_debounce(storage: Arc<dyn DocumentStore>, delay: Duration) -> Self {
        let objects = match storage.load() {
            Ok(objects) => objects,
            Err(err) => {
                warn!(error = %err, "failed to load document, starting empty");
                Vec::new()
            }
        };
        debug!(objects = objects.len(), "workspace loaded");

        let state = Arc::new(Mutex::new(WorkspaceState::from_objects(objects)));

        let task_state = Arc::clone(&state);
        let scheduler = SaveScheduler::new(delay, move || {
            persist(&task_state, storage.as_ref());
        });

        Self {
            state,
            listeners: Arc::new(Mutex::new(HashMap::new())),
            scheduler,
        }
    }

    /// Applies one transition, notifying subscribers and scheduling a save
    /// when document state was mutated.
    pub fn dispatch(&self, action: Action) {
        let (snapshot, mutated) = {
            let mut state = self.state.lock();
            let mutated = action.apply(&mut state);
            if mutated {
                state.mark_dirty();
            }
            debug!(action = action.name(), mutated, "dispatched");
            (state.clone(), mutated)
        };

        if mutated {
            self.scheduler.schedule();
        }

        let listeners = self.listeners.lock();
        for listener in listeners.values() {
            listener(&snapshot);
        }
    }

    /// Routes a UI event: teardown events flush, everything else maps to an
    /// action and is dispatched.
    pub fn handle_input(&self, event: InputEvent) {
        if event.is_teardown() {
            self.flush();
        } else if let Some(action) = input::action_for(&event) {
            self.dispatch(action);
        }
    }

    /// Cloned snapshot of the current state.
    pub fn state(&self) -> WorkspaceState {
        self.state.lock().clone()
    }

    /// Registers a change listener; it is called with a state snapshot after
    /// every dispatch.
    pub fn subscribe(&self, listener: impl Fn(&WorkspaceState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.listeners.lock().insert(id, Box::new(listener));
        debug!(subscription = %id, "listener subscribed");
        id
    }

    /// Removes a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.lock().remove(&id).is_some()
    }

    /// Cancels any pending save timer and persists immediately.
    pub fn flush(&self) {
        self.scheduler.flush();
    }

    /// Whether a debounced save is currently pending.
    pub fn save_pending(&self) -> bool {
        self.scheduler.has_pending()
    }
}

impl Drop for EditorStore {
    fn drop(&mut self) {
        // Unmount guarantee: nothing dirty survives the store.
        self.flush();
    }
}

/// The save task: snapshots live objects and writes them, holding the state
/// lock so the write is serialized with transitions. A clean state skips the
/// write. Failures are logged and leave the state dirty so the next
/// scheduled save or flush retries.
fn persist(state: &Mutex<WorkspaceState>, storage: &dyn DocumentStore) {
    let mut state = state.lock();
    if !state.is_dirty() {
        return;
    }

    let snapshot = state.snapshot_live();
    match storage.save(&snapshot) {
        Ok(()) => {
            state.mark_clean();
            debug!(objects = snapshot.len(), "document persisted");
        }
        Err(err) => {
            warn!(error = %err, "failed to persist document");
        }
    }
}
