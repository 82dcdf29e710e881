//! Polled PS/2 keyboard port

use textos_arch::port::inb;
use textos_driver_traits::{KeyboardPort, Scancode};

const DATA_PORT: u16 = 0x60;
const STATUS_PORT: u16 = 0x64;

/// Output buffer full bit in the status register
const STATUS_OUTPUT_FULL: u8 = 0x01;

/// The PS/2 controller, polled. There is no IRQ1 handler in this design.
pub struct Ps2Keyboard;

impl Ps2Keyboard {
    pub fn new() -> Self {
        Ps2Keyboard
    }
}

impl Default for Ps2Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardPort for Ps2Keyboard {
    fn has_byte(&mut self) -> bool {
        unsafe { inb(STATUS_PORT) & STATUS_OUTPUT_FULL != 0 }
    }

    fn read_byte(&mut self) -> Scancode {
        unsafe { inb(DATA_PORT) }
    }
}
