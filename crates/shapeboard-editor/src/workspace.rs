//! Workspace state machine.
//!
//! [`WorkspaceState`] holds everything the editor mutates: the object arena,
//! the selection, in-flight gesture tracking and viewport geometry. Objects
//! live in an arena of optional slots; a deleted object becomes a tombstone
//! (`None`) and is never removed, because slot indices double as the stable
//! identity used by selection sets and by the renderer's reconciliation key.
//!
//! Every transition returns whether it mutated document state (objects,
//! selection or colors). The store uses that flag to mark the state dirty
//! and re-arm the debounced save; transient drag/marquee bookkeeping reports
//! `false`.

use std::collections::BTreeSet;

use tracing::debug;

use shapeboard_core::{Color, Point, Rect, SelectableShape, Shape, Size, StoredShape};

use crate::selection::Selection;

/// The full mutable editor state.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    objects: Vec<Option<StoredShape>>,
    selection: Selection,
    /// Last cursor position during an object-move drag, in page coordinates.
    drag_anchor: Option<Point>,
    /// Cursor position where a marquee drag started, in page coordinates.
    marquee_anchor: Option<Point>,
    /// Current marquee rectangle in workspace-local coordinates, possibly
    /// unnormalized.
    marquee_rect: Option<Rect>,
    workspace_origin: Option<Point>,
    workspace_size: Option<Size>,
    last_fill_color: Option<Color>,
    last_border_color: Option<Color>,
    dirty: bool,
}

impl WorkspaceState {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workspace from persisted shapes; selection starts empty.
    pub fn from_objects(objects: Vec<StoredShape>) -> Self {
        Self {
            objects: objects.into_iter().map(Some).collect(),
            ..Self::default()
        }
    }

    // --- Reads ---

    /// The object at `index`, `None` for tombstoned or out-of-range slots.
    pub fn object(&self, index: usize) -> Option<&StoredShape> {
        self.objects.get(index).and_then(|slot| slot.as_ref())
    }

    /// Iterates live objects with their stable indices.
    pub fn live_objects(&self) -> impl Iterator<Item = (usize, &StoredShape)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|shape| (index, shape)))
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.objects.iter().filter(|slot| slot.is_some()).count()
    }

    /// Total number of slots, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.objects.len()
    }

    /// The effective selection: committed plus marquee deltas, live slots
    /// only. Computed on every read.
    pub fn effective_selection(&self) -> BTreeSet<usize> {
        self.selection
            .effective(|index| self.object(index).is_some())
    }

    /// The object at `index` paired with its effective selection flag, for
    /// the presentation layer.
    pub fn selectable(&self, index: usize) -> Option<SelectableShape> {
        let stored = self.object(index)?;
        Some(SelectableShape {
            shape: stored.shape.clone(),
            selected: self
                .selection
                .is_effective(index, |i| self.object(i).is_some()),
        })
    }

    /// Snapshot of live objects in slot order, for persistence.
    pub fn snapshot_live(&self) -> Vec<StoredShape> {
        self.objects.iter().flatten().cloned().collect()
    }

    /// Current marquee rectangle, if a marquee drag is in progress.
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.marquee_rect
    }

    pub fn workspace_size(&self) -> Option<Size> {
        self.workspace_size
    }

    pub fn workspace_origin(&self) -> Option<Point> {
        self.workspace_origin
    }

    pub fn last_fill_color(&self) -> Option<&Color> {
        self.last_fill_color.as_ref()
    }

    pub fn last_border_color(&self) -> Option<&Color> {
        self.last_border_color.as_ref()
    }

    /// Whether unsaved mutations exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // --- Transitions ---

    /// Records workspace viewport geometry. Required before shape placement
    /// and marquee tracking are meaningful.
    pub fn set_viewport(&mut self, size: Size, origin: Point) -> bool {
        self.workspace_size = Some(size);
        self.workspace_origin = Some(origin);
        false
    }

    /// Appends a shape centered on the viewport and selects it.
    ///
    /// A shape without explicit colors picks up the last-used fill and
    /// border colors. No-op while the viewport is unknown.
    pub fn create_shape(&mut self, shape: Shape) -> bool {
        let Some(size) = self.workspace_size else {
            debug!("create_shape ignored: viewport unknown");
            return false;
        };

        let mut shape = shape;
        if shape.fill_color.is_none() {
            shape.fill_color = self.last_fill_color.clone();
        }
        if shape.border.color.is_none() {
            shape.border.color = self.last_border_color.clone();
        }

        let position = Point::new(
            size.width / 2.0 - shape.size.width / 2.0,
            size.height / 2.0 - shape.size.height / 2.0,
        );
        self.objects.push(Some(StoredShape::new(shape, position)));

        let index = self.objects.len() - 1;
        self.selection.replace(index);
        debug!(index, "shape created");
        true
    }

    /// Applies a fill color to every effectively selected object and
    /// remembers it for the next created shape.
    pub fn set_fill_color(&mut self, color: Color) -> bool {
        for index in self.effective_selection() {
            if let Some(slot) = self.objects.get_mut(index) {
                if let Some(stored) = slot.take() {
                    let mut shape = stored.shape.clone();
                    shape.fill_color = Some(color.clone());
                    *slot = Some(StoredShape::new(shape, stored.position));
                }
            }
        }
        self.last_fill_color = Some(color);
        true
    }

    /// Applies a border color to every effectively selected object and
    /// remembers it for the next created shape.
    pub fn set_border_color(&mut self, color: Color) -> bool {
        for index in self.effective_selection() {
            if let Some(slot) = self.objects.get_mut(index) {
                if let Some(stored) = slot.take() {
                    let mut shape = stored.shape.clone();
                    shape.border.color = Some(color.clone());
                    *slot = Some(StoredShape::new(shape, stored.position));
                }
            }
        }
        self.last_border_color = Some(color);
        true
    }

    /// Pointer down on object `index`.
    ///
    /// Shift-click toggles the object in the committed selection. A plain
    /// click leaves an already-selected object untouched (a group drag may
    /// follow) and otherwise makes it the sole selection. The drag anchor is
    /// recorded either way.
    pub fn begin_object_drag(&mut self, index: usize, point: Point, shift: bool) -> bool {
        if self.object(index).is_none() {
            return false;
        }

        let changed = if shift {
            self.selection.toggle(index);
            true
        } else if !self
            .selection
            .is_effective(index, |i| self.object(i).is_some())
        {
            self.selection.replace(index);
            true
        } else {
            false
        };

        self.drag_anchor = Some(point);
        changed
    }

    /// Pointer down on empty workspace: begins marquee tracking.
    ///
    /// Without shift the committed selection is cleared first; with shift it
    /// is preserved. No-op while the workspace origin is unknown.
    pub fn begin_workspace_drag(&mut self, point: Point, shift: bool) -> bool {
        let Some(origin) = self.workspace_origin else {
            debug!("begin_workspace_drag ignored: viewport unknown");
            return false;
        };

        let local = Point::new(point.x - origin.x, point.y - origin.y);
        self.marquee_anchor = Some(point);
        self.marquee_rect = Some(Rect::degenerate(local));

        if !shift && !self.selection.is_empty() {
            self.selection.clear();
            true
        } else {
            false
        }
    }

    /// Pointer move: advances an object drag and/or the marquee.
    ///
    /// Object moves accumulate pure deltas: each move translates by
    /// `point - drag_anchor` and advances the anchor, so repeated reads
    /// cannot drift. Marquee moves recompute the rectangle and re-run the
    /// intersection pass.
    pub fn pointer_moved(&mut self, point: Point, shift: bool) -> bool {
        let mut changed = false;

        if let Some(anchor) = self.drag_anchor {
            let dx = point.x - anchor.x;
            let dy = point.y - anchor.y;
            for index in self.effective_selection() {
                if let Some(slot) = self.objects.get_mut(index) {
                    if let Some(stored) = slot.as_ref() {
                        *slot = Some(stored.translated(dx, dy));
                        changed = true;
                    }
                }
            }
            self.drag_anchor = Some(point);
        }

        if self.marquee_anchor.is_some() {
            self.update_marquee(point);
            self.run_marquee_pass(shift);
        }

        changed
    }

    /// Pointer up: finalizes an object drag and/or the marquee.
    ///
    /// A marquee released exactly on its anchor point is a deselect-all
    /// click. Otherwise the effective selection snapshot is committed.
    pub fn pointer_released(&mut self, point: Point, shift: bool) -> bool {
        let mut changed = false;

        self.drag_anchor = None;

        if let Some(anchor) = self.marquee_anchor {
            if anchor == point {
                changed = !self.selection.is_empty();
                self.selection.clear();
                debug!("marquee released without movement: selection cleared");
            } else {
                self.update_marquee(point);
                self.run_marquee_pass(shift);
                self.selection
                    .commit_pending(|index| self.objects.get(index).is_some_and(|s| s.is_some()));
                changed = true;
            }
            self.marquee_anchor = None;
            self.marquee_rect = None;
        }

        changed
    }

    /// Shift pressed or released while a marquee may be active.
    ///
    /// Rebuilds the pending sets from the current marquee rectangle under
    /// the new shift state; stale previews from the old state are dropped.
    pub fn shift_toggled(&mut self, pressed: bool) -> bool {
        if self.marquee_anchor.is_some() {
            self.selection.clear_pending();
            self.run_marquee_pass(pressed);
        }
        false
    }

    /// Selects every live object.
    pub fn select_all(&mut self) -> bool {
        let live: Vec<usize> = self.live_objects().map(|(index, _)| index).collect();
        self.selection.set_committed(live);
        true
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) -> bool {
        let changed = !self.selection.is_empty();
        self.selection.clear();
        changed
    }

    /// Tombstones every effectively selected slot and clears the selection.
    ///
    /// Slots are kept (as `None`) so surviving objects retain their indices.
    pub fn delete_selected(&mut self) -> bool {
        let selected = self.effective_selection();
        if selected.is_empty() {
            self.selection.clear();
            return false;
        }

        for index in &selected {
            self.objects[*index] = None;
        }
        self.selection.clear();
        debug!(deleted = selected.len(), "selection deleted");
        true
    }

    // --- Marquee internals ---

    fn update_marquee(&mut self, point: Point) {
        let (Some(anchor), Some(origin)) = (self.marquee_anchor, self.workspace_origin) else {
            return;
        };
        let anchor_local = Point::new(anchor.x - origin.x, anchor.y - origin.y);
        let current_local = Point::new(point.x - origin.x, point.y - origin.y);
        self.marquee_rect = Some(Rect::new(anchor_local, current_local));
    }

    /// Routes every live object intersecting the marquee into the pending
    /// sets. Insert-only: objects that have left the marquee keep their
    /// pending entry for the remainder of the drag.
    fn run_marquee_pass(&mut self, shift: bool) {
        let Some(marquee) = self.marquee_rect else {
            return;
        };
        let marquee = marquee.normalized();

        let hits: Vec<usize> = self
            .live_objects()
            .filter(|(_, stored)| stored.bounding_box().intersects(&marquee))
            .map(|(index, _)| index)
            .collect();

        for index in hits {
            self.selection.mark_intersecting(index, shift);
        }
    }
}
