//! TEXTOS kernel entry and run loop.
//!
//! The bootloader leaves the machine in long mode with low memory
//! identity-mapped and VGA text mode 3 active, then jumps to `_start`.
//! From there: serial debug port up, heap up, hardware facts probed once,
//! and the single-threaded shell loop runs until `shutdown`.

#![no_std]
#![no_main]

extern crate alloc;

use core::panic::PanicInfo;
use linked_list_allocator::LockedHeap;

use textos_arch::{cpu, serial, serial_println};
use textos_driver_keyboard::Ps2Keyboard;
use textos_driver_video::VgaText;
use textos_shell::{Exec, Session, SystemFacts};

#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

// Fixed heap region above the kernel image
const HEAP_START: usize = 0x300000;
const HEAP_SIZE: usize = 1024 * 1024; // 1 MiB

#[no_mangle]
pub extern "C" fn _start() -> ! {
    // Input is polled, not interrupt-driven; keep IRQs off for good.
    textos_arch::disable_interrupts();

    serial::SERIAL.lock().init();
    serial_println!("TEXTOS v0.1 booting...");

    unsafe {
        ALLOCATOR.lock().init(HEAP_START as *mut u8, HEAP_SIZE);
    }
    serial_println!("[mem] heap: {} KiB at {:#x}", HEAP_SIZE / 1024, HEAP_START);

    let facts = SystemFacts {
        cpu_vendor: cpu::vendor(),
        memory_kb: cpu::conventional_memory_kb(),
    };
    serial_println!("[cpu] vendor: {}", facts.vendor_str());
    serial_println!("[mem] conventional: {} KB", facts.memory_kb);

    let mut keyboard = Ps2Keyboard::new();
    let mut session = Session::new(VgaText::new(), facts);
    serial_println!("[con] console ready, entering shell loop");

    // One thread of control: redraw the banner, apply at most one key,
    // repeat. Command dispatch happens inside poll on enter.
    loop {
        session.draw_banner();
        if let Exec::Shutdown = session.poll(&mut keyboard) {
            break;
        }
    }

    serial_println!("[sys] shutdown requested, halting");
    textos_arch::halt_loop();
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    serial_println!("KERNEL PANIC: {}", info);
    textos_arch::halt_loop();
}
