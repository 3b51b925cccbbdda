//! Input decoding: raw escape-encoded bytes or crossterm events into
//! [`Input`] values.
//!
//! The byte decoder covers the sequences the runtime actually receives
//! from a raw-mode terminal: SGR mouse reports, CSI-encoded arrows and
//! function keys, control bytes and printable UTF-8. The crossterm path
//! converts already-parsed events and is what the production backend
//! uses.

use crate::event::{Input, criteria};

/// Decode a chunk of raw terminal bytes into input events.
///
/// Unrecognized sequences are skipped; the decoder never fails.
pub fn decode(bytes: &[u8]) -> Vec<Input> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            0x1b => {
                let consumed = decode_escape(&bytes[i..], &mut out);
                i += consumed.max(1);
            }
            b'\r' | b'\n' => {
                out.push(Input::named(criteria::ENTER));
                i += 1;
            }
            b'\t' => {
                out.push(Input::named(criteria::TAB));
                i += 1;
            }
            0x7f | 0x08 => {
                out.push(Input::named(criteria::BACKSPACE));
                i += 1;
            }
            0x01..=0x1a => {
                // Ctrl+letter arrives as the letter minus 0x60.
                out.push(Input::named(criteria::CTRL));
                out.push(Input::key(char::from(b + 0x60)));
                i += 1;
            }
            _ => {
                // Printable UTF-8 scalar.
                let len = utf8_len(b);
                if let Some(slice) = bytes.get(i..i + len)
                    && let Ok(s) = std::str::from_utf8(slice)
                    && let Some(c) = s.chars().next()
                {
                    out.push(Input::key(c));
                    i += len;
                } else {
                    i += 1;
                }
            }
        }
    }

    out
}

/// Decode one escape sequence starting at `bytes[0] == ESC`; returns the
/// number of bytes consumed.
fn decode_escape(bytes: &[u8], out: &mut Vec<Input>) -> usize {
    match bytes.get(1) {
        Some(b'[') => decode_csi(bytes, out),
        Some(b'O') => {
            // SS3-encoded F1..F4.
            if let Some(fin) = bytes.get(2) {
                if (b'P'..=b'S').contains(fin) {
                    out.push(Input::named(criteria::function_key(fin - b'P' + 1)));
                }
                3
            } else {
                1
            }
        }
        Some(&next) if next >= 0x20 && next < 0x7f => {
            // Alt prefix: ESC followed by a printable byte.
            out.push(Input::named(criteria::ALT));
            out.push(Input::key(char::from(next)));
            2
        }
        _ => 1,
    }
}

/// Decode a CSI sequence (`ESC [ params final`); returns bytes consumed.
fn decode_csi(bytes: &[u8], out: &mut Vec<Input>) -> usize {
    let mut i = 2;
    let sgr_mouse = bytes.get(2) == Some(&b'<');
    if sgr_mouse {
        i += 1;
    }

    let params_start = i;
    while i < bytes.len() && !bytes[i].is_ascii_alphabetic() && bytes[i] != b'~' {
        i += 1;
    }
    let Some(&fin) = bytes.get(i) else {
        return bytes.len();
    };
    let params: Vec<u16> = bytes[params_start..i]
        .split(|&b| b == b';')
        .filter_map(|p| std::str::from_utf8(p).ok()?.parse().ok())
        .collect();
    let consumed = i + 1;

    if sgr_mouse {
        decode_sgr_mouse(&params, fin, out);
        return consumed;
    }

    match fin {
        b'A' => out.push(Input::named(criteria::ARROW_UP)),
        b'B' => out.push(Input::named(criteria::ARROW_DOWN)),
        b'C' => out.push(Input::named(criteria::ARROW_RIGHT)),
        b'D' => out.push(Input::named(criteria::ARROW_LEFT)),
        b'H' => out.push(Input::named(criteria::HOME)),
        b'F' => out.push(Input::named(criteria::END)),
        b'~' => {
            let code = params.first().copied().unwrap_or(0);
            let mapped = match code {
                1 | 7 => Some(criteria::HOME),
                2 => Some(criteria::INSERT),
                3 => Some(criteria::DELETE),
                4 | 8 => Some(criteria::END),
                5 => Some(criteria::PAGE_UP),
                6 => Some(criteria::PAGE_DOWN),
                11..=15 => Some(criteria::function_key((code - 10) as u8)),
                17..=21 => Some(criteria::function_key((code - 11) as u8)),
                23 | 24 => Some(criteria::function_key((code - 12) as u8)),
                _ => None,
            };
            if let Some(c) = mapped {
                out.push(Input::named(c));
            }
        }
        _ => {}
    }
    consumed
}

/// Decode an SGR mouse report (`CSI < b;x;y M|m`). Coordinates arrive
/// 1-based.
fn decode_sgr_mouse(params: &[u16], fin: u8, out: &mut Vec<Input>) {
    let (Some(&b), Some(&px), Some(&py)) = (params.first(), params.get(1), params.get(2)) else {
        return;
    };
    let x = px.saturating_sub(1);
    let y = py.saturating_sub(1);

    if b & 64 != 0 {
        let c = if b & 1 == 0 {
            criteria::MOUSE_MIDDLE_SCROLL_UP
        } else {
            criteria::MOUSE_MIDDLE_SCROLL_DOWN
        };
        out.push(Input::mouse(c, x, y));
        return;
    }
    if b & 32 != 0 {
        out.push(Input::mouse(criteria::MOUSE_MOVE, x, y));
        return;
    }

    let pressed = fin == b'M';
    let c = match (b & 3, pressed) {
        (0, true) => criteria::MOUSE_LEFT_PRESSED,
        (0, false) => criteria::MOUSE_LEFT_CLICKED,
        (1, true) => criteria::MOUSE_MIDDLE_PRESSED,
        (1, false) => criteria::MOUSE_MIDDLE_CLICKED,
        (2, true) => criteria::MOUSE_RIGHT_PRESSED,
        (2, false) => criteria::MOUSE_RIGHT_CLICKED,
        _ => criteria::MOUSE_MOVE,
    };
    out.push(Input::mouse(c, x, y));
}

const fn utf8_len(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}

/// Convert a crossterm event into input events. Modifier keys are
/// emitted before the key they accompany, matching the byte decoder.
pub fn convert(event: crossterm::event::Event) -> Vec<Input> {
    use crossterm::event::{Event, KeyCode, KeyModifiers, MouseEventKind};

    let mut out = Vec::new();
    match event {
        Event::Key(key) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                out.push(Input::named(criteria::CTRL));
            }
            if key.modifiers.contains(KeyModifiers::ALT) {
                out.push(Input::named(criteria::ALT));
            }
            if key.modifiers.contains(KeyModifiers::SHIFT)
                && !matches!(key.code, KeyCode::Char(_))
            {
                out.push(Input::named(criteria::SHIFT));
            }
            let mapped = match key.code {
                KeyCode::Char(c) => Some(Input::key(c)),
                KeyCode::Enter => Some(Input::named(criteria::ENTER)),
                KeyCode::Backspace => Some(Input::named(criteria::BACKSPACE)),
                KeyCode::Tab | KeyCode::BackTab => Some(Input::named(criteria::TAB)),
                KeyCode::Up => Some(Input::named(criteria::ARROW_UP)),
                KeyCode::Down => Some(Input::named(criteria::ARROW_DOWN)),
                KeyCode::Left => Some(Input::named(criteria::ARROW_LEFT)),
                KeyCode::Right => Some(Input::named(criteria::ARROW_RIGHT)),
                KeyCode::Home => Some(Input::named(criteria::HOME)),
                KeyCode::End => Some(Input::named(criteria::END)),
                KeyCode::Insert => Some(Input::named(criteria::INSERT)),
                KeyCode::Delete => Some(Input::named(criteria::DELETE)),
                KeyCode::PageUp => Some(Input::named(criteria::PAGE_UP)),
                KeyCode::PageDown => Some(Input::named(criteria::PAGE_DOWN)),
                KeyCode::F(n) => {
                    let bit = criteria::function_key(n);
                    if bit != 0 {
                        Some(Input::named(bit))
                    } else {
                        None
                    }
                }
                _ => None,
            };
            out.extend(mapped);
        }
        Event::Mouse(me) => {
            use crossterm::event::MouseButton;
            let c = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => criteria::MOUSE_LEFT_PRESSED,
                MouseEventKind::Down(MouseButton::Middle) => criteria::MOUSE_MIDDLE_PRESSED,
                MouseEventKind::Down(_) => criteria::MOUSE_RIGHT_PRESSED,
                MouseEventKind::Up(MouseButton::Left) => criteria::MOUSE_LEFT_CLICKED,
                MouseEventKind::Up(MouseButton::Middle) => criteria::MOUSE_MIDDLE_CLICKED,
                MouseEventKind::Up(_) => criteria::MOUSE_RIGHT_CLICKED,
                MouseEventKind::ScrollUp => criteria::MOUSE_MIDDLE_SCROLL_UP,
                MouseEventKind::ScrollDown => criteria::MOUSE_MIDDLE_SCROLL_DOWN,
                _ => criteria::MOUSE_MOVE,
            };
            out.push(Input::mouse(c, me.column, me.row));
        }
        Event::Resize(w, h) => out.push(Input::resize(w, h)),
        _ => {}
    }
    out
}
