//! TEXTOS Keyboard Driver
//!
//! Scancode set 1 decoding for the console keymap (letters, digits, space,
//! enter, and the keypad operator keys), plus the polled PS/2 port.
//!
//! The decoder is a pure function so it can be tested on the host:
//! `cargo test -p textos-driver-keyboard`

#![cfg_attr(not(test), no_std)]

mod ps2;

pub use ps2::Ps2Keyboard;

use textos_driver_traits::{Scancode, KEY_RELEASE};

/// Scancode set 1 key codes for keys with editing behavior
pub mod scancodes {
    pub const BACKSPACE: u8 = 0x0E;
    pub const ENTER: u8 = 0x1C;
    pub const SPACE: u8 = 0x39;
    pub const DELETE: u8 = 0x53;
}

/// A decoded key the input pipeline acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (lowercase letter, digit, space, operator)
    Char(u8),
    Enter,
    Backspace,
    Delete,
}

/// Scancode to character mapping for the console keymap.
/// Zero means the key produces no character.
static SCANCODE_TO_CHAR: [u8; 128] = [
    0,    0,    b'1', b'2', b'3', b'4', b'5', b'6',    // 0x00-0x07
    b'7', b'8', b'9', b'0', 0,    0,    0,    0,       // 0x08-0x0F
    b'q', b'w', b'e', b'r', b't', b'y', b'u', b'i',    // 0x10-0x17
    b'o', b'p', 0,    0,    0,    0,    b'a', b's',    // 0x18-0x1F
    b'd', b'f', b'g', b'h', b'j', b'k', b'l', 0,       // 0x20-0x27
    0,    0,    0,    0,    b'z', b'x', b'c', b'v',    // 0x28-0x2F
    b'b', b'n', b'm', 0,    0,    0,    0,    b'*',    // 0x30-0x37 (keypad *)
    0,    b' ', 0,    0,    0,    0,    0,    0,       // 0x38-0x3F
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x40-0x47
    0,    0,    b'/', 0,    b'+', 0,    b'-', 0,       // 0x48-0x4F (keypad ops)
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x50-0x57
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x58-0x5F
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x60-0x67
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x68-0x6F
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x70-0x77
    0,    0,    0,    0,    0,    0,    0,    0,       // 0x78-0x7F
];

/// Decode one raw scancode.
///
/// Key-release events (bit 7 set) and unmapped keys produce `None`.
pub fn decode(scancode: Scancode) -> Option<Key> {
    if scancode & KEY_RELEASE != 0 {
        return None;
    }
    match scancode {
        scancodes::ENTER => Some(Key::Enter),
        scancodes::BACKSPACE => Some(Key::Backspace),
        scancodes::DELETE => Some(Key::Delete),
        _ => match SCANCODE_TO_CHAR[scancode as usize] {
            0 => None,
            ch => Some(Key::Char(ch)),
        },
    }
}
