//! Selection bookkeeping.
//!
//! Tracks the committed selection set plus the add/remove deltas accumulated
//! by an in-progress marquee drag. The selection the user actually sees (the
//! effective selection) is derived on every read as
//! `committed ∪ pending_add \ pending_remove`, filtered to live slots; it is
//! never cached.

use std::collections::BTreeSet;

/// Manages the committed selection and in-progress marquee deltas.
///
/// Indices refer to slots in the workspace object arena. The pending sets
/// are kept disjoint: an index is routed to `pending_add` or
/// `pending_remove` based on whether it is currently committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    committed: BTreeSet<usize>,
    pending_add: BTreeSet<usize>,
    pending_remove: BTreeSet<usize>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the effective selection: committed plus pending additions,
    /// minus pending removals, dropping indices whose slot is tombstoned.
    pub fn effective(&self, is_live: impl Fn(usize) -> bool) -> BTreeSet<usize> {
        let mut out: BTreeSet<usize> = self.committed.union(&self.pending_add).copied().collect();
        for index in &self.pending_remove {
            out.remove(index);
        }
        out.retain(|&index| is_live(index));
        out
    }

    /// Whether `index` is in the effective selection.
    pub fn is_effective(&self, index: usize, is_live: impl Fn(usize) -> bool) -> bool {
        if !is_live(index) || self.pending_remove.contains(&index) {
            return false;
        }
        self.committed.contains(&index) || self.pending_add.contains(&index)
    }

    /// The committed set, definitive when no gesture is in progress.
    pub fn committed(&self) -> &BTreeSet<usize> {
        &self.committed
    }

    /// Whether either pending set holds entries.
    pub fn has_pending(&self) -> bool {
        !self.pending_add.is_empty() || !self.pending_remove.is_empty()
    }

    /// Whether nothing is committed or pending.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && !self.has_pending()
    }

    /// Replaces the selection with the single index.
    pub fn replace(&mut self, index: usize) {
        self.committed.clear();
        self.committed.insert(index);
        self.clear_pending();
    }

    /// Replaces the committed set wholesale (select-all); clears pending.
    pub fn set_committed(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.committed = indices.into_iter().collect();
        self.clear_pending();
    }

    /// Toggles `index` in the committed set (shift-click).
    pub fn toggle(&mut self, index: usize) {
        if !self.committed.remove(&index) {
            self.committed.insert(index);
        }
    }

    /// Clears committed and pending sets.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.clear_pending();
    }

    /// Clears only the pending delta sets.
    pub fn clear_pending(&mut self) {
        self.pending_add.clear();
        self.pending_remove.clear();
    }

    /// Routes an object intersecting the marquee into the pending sets.
    ///
    /// Without shift, only non-committed objects are previewed as additions.
    /// With shift, committed objects are previewed as removals and
    /// non-committed ones as additions. Insert-only: entries accumulated
    /// earlier in the drag stay even if the object has left the marquee.
    pub fn mark_intersecting(&mut self, index: usize, shift: bool) {
        if shift {
            if self.committed.contains(&index) {
                self.pending_remove.insert(index);
            } else {
                self.pending_add.insert(index);
            }
        } else if !self.committed.contains(&index) {
            self.pending_add.insert(index);
        }
    }

    /// Commits the effective selection and resets the deltas (marquee
    /// release).
    pub fn commit_pending(&mut self, is_live: impl Fn(usize) -> bool) {
        self.committed = self.effective(is_live);
        self.clear_pending();
    }
}
