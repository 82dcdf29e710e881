//! Keyboard Capability
//!
//! Implemented by the PS/2 driver and by scripted fakes in tests.
//! The port hands out raw scancodes; translation is the decoder's job.

/// Keyboard scancode (raw hardware code)
pub type Scancode = u8;

/// Release flag (OR'd with the scancode on key-up events)
pub const KEY_RELEASE: u8 = 0x80;

/// The keyboard as the core sees it: a status check and a data read.
pub trait KeyboardPort {
    /// Check whether a scancode byte is pending (non-blocking)
    fn has_byte(&mut self) -> bool;

    /// Fetch one scancode byte. Only meaningful after `has_byte`
    /// reported pending data.
    fn read_byte(&mut self) -> Scancode;
}
