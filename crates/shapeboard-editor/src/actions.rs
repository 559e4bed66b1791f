//! Dispatchable editor actions.
//!
//! Every workspace transition has an [`Action`] variant so the presentation
//! layer can drive the state machine through a single dispatch entry point.

use shapeboard_core::{Color, Point, Shape, Size};

use crate::workspace::WorkspaceState;

/// A single state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Records workspace viewport geometry (size, page-coordinate origin).
    SetViewport { size: Size, origin: Point },
    /// Appends a shape centered on the viewport and selects it.
    CreateShape(Shape),
    /// Applies a fill color to the effective selection.
    SetFillColor(Color),
    /// Applies a border color to the effective selection.
    SetBorderColor(Color),
    /// Pointer down on an object.
    PointerDownOnObject {
        index: usize,
        point: Point,
        shift: bool,
    },
    /// Pointer down on empty workspace.
    PointerDownOnWorkspace { point: Point, shift: bool },
    /// Pointer moved with a button held.
    PointerMoved { point: Point, shift: bool },
    /// Pointer released.
    PointerReleased { point: Point, shift: bool },
    /// Shift pressed or released, independent of mouse buttons.
    ShiftToggled(bool),
    SelectAll,
    ClearSelection,
    DeleteSelected,
}

impl Action {
    /// Applies the transition, returning whether document state (objects,
    /// selection or colors) was mutated.
    pub fn apply(&self, state: &mut WorkspaceState) -> bool {
        match self {
            Action::SetViewport { size, origin } => state.set_viewport(*size, *origin),
            Action::CreateShape(shape) => state.create_shape(shape.clone()),
            Action::SetFillColor(color) => state.set_fill_color(color.clone()),
            Action::SetBorderColor(color) => state.set_border_color(color.clone()),
            Action::PointerDownOnObject {
                index,
                point,
                shift,
            } => state.begin_object_drag(*index, *point, *shift),
            Action::PointerDownOnWorkspace { point, shift } => {
                state.begin_workspace_drag(*point, *shift)
            }
            Action::PointerMoved { point, shift } => state.pointer_moved(*point, *shift),
            Action::PointerReleased { point, shift } => state.pointer_released(*point, *shift),
            Action::ShiftToggled(pressed) => state.shift_toggled(*pressed),
            Action::SelectAll => state.select_all(),
            Action::ClearSelection => state.clear_selection(),
            Action::DeleteSelected => state.delete_selected(),
        }
    }

    /// Action name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetViewport { .. } => "set_viewport",
            Action::CreateShape(_) => "create_shape",
            Action::SetFillColor(_) => "set_fill_color",
            Action::SetBorderColor(_) => "set_border_color",
            Action::PointerDownOnObject { .. } => "pointer_down_on_object",
            Action::PointerDownOnWorkspace { .. } => "pointer_down_on_workspace",
            Action::PointerMoved { .. } => "pointer_moved",
            Action::PointerReleased { .. } => "pointer_released",
            Action::ShiftToggled(_) => "shift_toggled",
            Action::SelectAll => "select_all",
            Action::ClearSelection => "clear_selection",
            Action::DeleteSelected => "delete_selected",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapeboard_core::ShapeKind;

    #[test]
    fn test_apply_reports_document_mutation() {
        let mut state = WorkspaceState::new();

        // Viewport bookkeeping is transient.
        let viewport = Action::SetViewport {
            size: Size::new(800.0, 600.0),
            origin: Point::new(0.0, 0.0),
        };
        assert!(!viewport.apply(&mut state));

        // Creating a shape mutates the document.
        let create = Action::CreateShape(Shape::new(ShapeKind::Rectangle, 80.0, 40.0));
        assert!(create.apply(&mut state));

        // Clearing an already-empty selection does not.
        Action::ClearSelection.apply(&mut state);
        assert!(!Action::ClearSelection.apply(&mut state));
    }
}
