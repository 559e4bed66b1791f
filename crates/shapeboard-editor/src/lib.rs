//! # Shapeboard Editor
//!
//! The selection-and-manipulation state machine for the Shapeboard canvas
//! editor.
//!
//! ## Core Components
//!
//! - **Selection**: committed selection set plus in-progress marquee deltas,
//!   combined into the effective selection on every read.
//! - **WorkspaceState**: the object arena (tombstoned slots keep indices
//!   stable), gesture tracking, and every state transition (create, move,
//!   restyle, select, delete).
//! - **Action / EditorStore**: transitions expressed as dispatchable actions
//!   over an observable store that notifies subscribers and drives the
//!   debounced persistence scheduler.
//! - **Input**: pure mapping from pointer/keyboard/lifecycle events to
//!   actions.
//!
//! ## Architecture
//!
//! ```text
//! InputEvent ── input::action_for ──▶ Action
//!                                      │ dispatch
//!                                      ▼
//! EditorStore ──▶ WorkspaceState (objects, Selection, drag/marquee)
//!      │                │
//!      │ notify         │ document mutated
//!      ▼                ▼
//! subscribers      SaveScheduler ──▶ DocumentStore
//! ```

pub mod actions;
pub mod input;
pub mod selection;
pub mod store;
pub mod workspace;

pub use actions::Action;
pub use input::{InputEvent, Key, Modifiers, PointerTarget};
pub use selection::Selection;
pub use store::{EditorStore, SubscriptionId};
pub use workspace::WorkspaceState;
