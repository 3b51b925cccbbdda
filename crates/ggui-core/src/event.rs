//! Input events and the criteria bitset used to match them to handlers.

/// Criteria bits. An [`Input`] carries exactly one bit; a handler's
/// criteria may combine several.
pub mod criteria {
    /// A printable key press (the character is in `Input::data`).
    pub const KEY_PRESS: u64 = 1 << 0;
    /// Enter / Return.
    pub const ENTER: u64 = 1 << 1;
    /// Backspace.
    pub const BACKSPACE: u64 = 1 << 2;
    /// Tab.
    pub const TAB: u64 = 1 << 3;
    /// Arrow up.
    pub const ARROW_UP: u64 = 1 << 4;
    /// Arrow down.
    pub const ARROW_DOWN: u64 = 1 << 5;
    /// Arrow left.
    pub const ARROW_LEFT: u64 = 1 << 6;
    /// Arrow right.
    pub const ARROW_RIGHT: u64 = 1 << 7;
    /// Shift.
    pub const SHIFT: u64 = 1 << 8;
    /// Control.
    pub const CTRL: u64 = 1 << 9;
    /// Alt.
    pub const ALT: u64 = 1 << 10;
    /// Home.
    pub const HOME: u64 = 1 << 11;
    /// End.
    pub const END: u64 = 1 << 12;
    /// Insert.
    pub const INSERT: u64 = 1 << 13;
    /// Delete.
    pub const DELETE: u64 = 1 << 14;
    /// Page up.
    pub const PAGE_UP: u64 = 1 << 15;
    /// Page down.
    pub const PAGE_DOWN: u64 = 1 << 16;
    /// Function key F1. F2..F12 occupy the following bits.
    pub const F1: u64 = 1 << 17;
    /// F2.
    pub const F2: u64 = 1 << 18;
    /// F3.
    pub const F3: u64 = 1 << 19;
    /// F4.
    pub const F4: u64 = 1 << 20;
    /// F5.
    pub const F5: u64 = 1 << 21;
    /// F6.
    pub const F6: u64 = 1 << 22;
    /// F7.
    pub const F7: u64 = 1 << 23;
    /// F8.
    pub const F8: u64 = 1 << 24;
    /// F9.
    pub const F9: u64 = 1 << 25;
    /// F10.
    pub const F10: u64 = 1 << 26;
    /// F11.
    pub const F11: u64 = 1 << 27;
    /// F12.
    pub const F12: u64 = 1 << 28;
    /// Left button click (press + release on the same cell).
    pub const MOUSE_LEFT_CLICKED: u64 = 1 << 29;
    /// Left button held.
    pub const MOUSE_LEFT_PRESSED: u64 = 1 << 30;
    /// Middle button click.
    pub const MOUSE_MIDDLE_CLICKED: u64 = 1 << 31;
    /// Middle button held.
    pub const MOUSE_MIDDLE_PRESSED: u64 = 1 << 32;
    /// Wheel scroll up.
    pub const MOUSE_MIDDLE_SCROLL_UP: u64 = 1 << 33;
    /// Wheel scroll down.
    pub const MOUSE_MIDDLE_SCROLL_DOWN: u64 = 1 << 34;
    /// Right button click.
    pub const MOUSE_RIGHT_CLICKED: u64 = 1 << 35;
    /// Right button held.
    pub const MOUSE_RIGHT_PRESSED: u64 = 1 << 36;
    /// Mouse movement (drives hover tracking).
    pub const MOUSE_MOVE: u64 = 1 << 37;
    /// Terminal resize (x/y carry the new dimensions).
    pub const RESIZE: u64 = 1 << 38;

    /// Every keyboard-originated bit.
    pub const KEYBOARD_ANY: u64 = KEY_PRESS
        | ENTER
        | BACKSPACE
        | TAB
        | ARROW_UP
        | ARROW_DOWN
        | ARROW_LEFT
        | ARROW_RIGHT
        | SHIFT
        | CTRL
        | ALT
        | HOME
        | END
        | INSERT
        | DELETE
        | PAGE_UP
        | PAGE_DOWN
        | F1
        | F2
        | F3
        | F4
        | F5
        | F6
        | F7
        | F8
        | F9
        | F10
        | F11
        | F12;

    /// Every mouse-originated bit.
    pub const MOUSE_ANY: u64 = MOUSE_LEFT_CLICKED
        | MOUSE_LEFT_PRESSED
        | MOUSE_MIDDLE_CLICKED
        | MOUSE_MIDDLE_PRESSED
        | MOUSE_MIDDLE_SCROLL_UP
        | MOUSE_MIDDLE_SCROLL_DOWN
        | MOUSE_RIGHT_CLICKED
        | MOUSE_RIGHT_PRESSED
        | MOUSE_MOVE;

    /// The function-key bit for `F1..=F12`, or 0 for anything else.
    pub const fn function_key(n: u8) -> u64 {
        if n >= 1 && n <= 12 {
            F1 << (n - 1)
        } else {
            0
        }
    }
}

/// A single input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Input {
    /// The criteria bit describing this event.
    pub criteria: u64,
    /// Mouse column, or new width for a resize.
    pub x: u16,
    /// Mouse row, or new height for a resize.
    pub y: u16,
    /// The character for `KEY_PRESS` events, `'\0'` otherwise.
    pub data: char,
}

impl Input {
    /// A printable key press.
    pub const fn key(c: char) -> Self {
        Self {
            criteria: criteria::KEY_PRESS,
            x: 0,
            y: 0,
            data: c,
        }
    }

    /// A named (non-printable) key.
    pub const fn named(criteria: u64) -> Self {
        Self {
            criteria,
            x: 0,
            y: 0,
            data: '\0',
        }
    }

    /// A mouse event at the given cell.
    pub const fn mouse(criteria: u64, x: u16, y: u16) -> Self {
        Self {
            criteria,
            x,
            y,
            data: '\0',
        }
    }

    /// A terminal resize.
    pub const fn resize(width: u16, height: u16) -> Self {
        Self {
            criteria: criteria::RESIZE,
            x: width,
            y: height,
            data: '\0',
        }
    }

    /// Returns true if this event carries a mouse position.
    pub const fn is_mouse(&self) -> bool {
        self.criteria & criteria::MOUSE_ANY != 0
    }
}
