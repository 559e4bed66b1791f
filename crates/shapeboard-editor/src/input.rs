//! Input event mapping.
//!
//! Pure translation of UI events (pointer, keyboard, viewport, lifecycle)
//! into editor [`Action`]s. Lifecycle events map to a flush instead of an
//! action and are handled directly by the store.

use shapeboard_core::{Point, Size};

use crate::actions::Action;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A live object, by stable index.
    Object(usize),
    /// Empty workspace.
    Workspace,
}

/// Keyboard keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
    Backspace,
    Shift,
    Char(char),
}

/// Modifier state accompanying a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// UI events consumed by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer down with page coordinates and the shift flag.
    PointerDown {
        target: PointerTarget,
        point: Point,
        shift: bool,
    },
    PointerMove { point: Point, shift: bool },
    PointerUp { point: Point, shift: bool },
    /// Key press or release.
    Key {
        key: Key,
        pressed: bool,
        modifiers: Modifiers,
    },
    /// Workspace viewport measured or resized.
    ViewportResized { size: Size, origin: Point },
    /// Tab/window hidden: flush unsaved state.
    VisibilityHidden,
    /// Window closing: flush unsaved state.
    WindowClosing,
}

impl InputEvent {
    /// Whether this event demands an immediate save flush.
    pub fn is_teardown(&self) -> bool {
        matches!(self, InputEvent::VisibilityHidden | InputEvent::WindowClosing)
    }
}

/// Maps an input event to the action it triggers, if any.
///
/// Keyboard shortcuts: Escape clears the selection, Delete/Backspace delete
/// it, Ctrl+A (without Alt or Shift) selects all, and Shift press/release
/// re-evaluates an active marquee. Teardown events return `None`; the store
/// flushes for those instead.
pub fn action_for(event: &InputEvent) -> Option<Action> {
    match event {
        InputEvent::PointerDown {
            target,
            point,
            shift,
        } => Some(match target {
            PointerTarget::Object(index) => Action::PointerDownOnObject {
                index: *index,
                point: *point,
                shift: *shift,
            },
            PointerTarget::Workspace => Action::PointerDownOnWorkspace {
                point: *point,
                shift: *shift,
            },
        }),
        InputEvent::PointerMove { point, shift } => Some(Action::PointerMoved {
            point: *point,
            shift: *shift,
        }),
        InputEvent::PointerUp { point, shift } => Some(Action::PointerReleased {
            point: *point,
            shift: *shift,
        }),
        InputEvent::Key {
            key,
            pressed,
            modifiers,
        } => match key {
            Key::Escape if *pressed => Some(Action::ClearSelection),
            Key::Delete | Key::Backspace if *pressed => Some(Action::DeleteSelected),
            Key::Char(c)
                if *pressed
                    && c.eq_ignore_ascii_case(&'a')
                    && modifiers.ctrl
                    && !modifiers.alt
                    && !modifiers.shift =>
            {
                Some(Action::SelectAll)
            }
            Key::Shift => Some(Action::ShiftToggled(*pressed)),
            _ => None,
        },
        InputEvent::ViewportResized { size, origin } => Some(Action::SetViewport {
            size: *size,
            origin: *origin,
        }),
        InputEvent::VisibilityHidden | InputEvent::WindowClosing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, pressed: bool, modifiers: Modifiers) -> InputEvent {
        InputEvent::Key {
            key,
            pressed,
            modifiers,
        }
    }

    #[test]
    fn test_escape_clears_selection() {
        let event = key(Key::Escape, true, Modifiers::default());
        assert_eq!(action_for(&event), Some(Action::ClearSelection));
        // Key-up does nothing.
        let event = key(Key::Escape, false, Modifiers::default());
        assert_eq!(action_for(&event), None);
    }

    #[test]
    fn test_delete_and_backspace_delete() {
        for k in [Key::Delete, Key::Backspace] {
            let event = key(k, true, Modifiers::default());
            assert_eq!(action_for(&event), Some(Action::DeleteSelected));
        }
    }

    #[test]
    fn test_ctrl_a_selects_all() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert_eq!(
            action_for(&key(Key::Char('a'), true, ctrl)),
            Some(Action::SelectAll)
        );

        // Alt or Shift disqualify the shortcut.
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        };
        assert_eq!(action_for(&key(Key::Char('a'), true, ctrl_shift)), None);
        let ctrl_alt = Modifiers {
            ctrl: true,
            alt: true,
            ..Modifiers::default()
        };
        assert_eq!(action_for(&key(Key::Char('a'), true, ctrl_alt)), None);
        assert_eq!(
            action_for(&key(Key::Char('a'), true, Modifiers::default())),
            None
        );
    }

    #[test]
    fn test_shift_maps_both_edges() {
        assert_eq!(
            action_for(&key(Key::Shift, true, Modifiers::default())),
            Some(Action::ShiftToggled(true))
        );
        assert_eq!(
            action_for(&key(Key::Shift, false, Modifiers::default())),
            Some(Action::ShiftToggled(false))
        );
    }

    #[test]
    fn test_pointer_down_targets() {
        let event = InputEvent::PointerDown {
            target: PointerTarget::Object(3),
            point: Point::new(1.0, 2.0),
            shift: false,
        };
        assert!(matches!(
            action_for(&event),
            Some(Action::PointerDownOnObject { index: 3, .. })
        ));

        let event = InputEvent::PointerDown {
            target: PointerTarget::Workspace,
            point: Point::new(1.0, 2.0),
            shift: true,
        };
        assert!(matches!(
            action_for(&event),
            Some(Action::PointerDownOnWorkspace { shift: true, .. })
        ));
    }

    #[test]
    fn test_teardown_events_map_to_flush() {
        assert!(InputEvent::VisibilityHidden.is_teardown());
        assert!(InputEvent::WindowClosing.is_teardown());
        assert_eq!(action_for(&InputEvent::VisibilityHidden), None);
    }
}
