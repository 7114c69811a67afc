// Input events as the controller sees them, independent of the window library.

use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keys the annotation tool cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Q,
    Z,
    C,
    R,
    G,
    B,
    Y,
    K,
    W,
    Backspace,
    Plus,
    Minus,
    BracketLeft,
    BracketRight,
}

/// Modifier keys held while a key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    #[cfg(test)]
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };
    #[cfg(test)]
    pub const CTRL: Modifiers = Modifiers { ctrl: true, ..Modifiers::NONE };

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Point, button: MouseButton },
    PointerUp { position: Point, button: MouseButton },
    PointerMove { position: Point },
    /// Vertical wheel notches, positive = away from the user.
    Scroll { delta: f32 },
    KeyDown { key: Key, modifiers: Modifiers },
    Quit,
}
