//! TEXTOS Console
//!
//! The character-cell display abstraction: a 16-color palette, a theme
//! (active colors plus the splash banner), and the `Console` cursor model
//! over any `TextSurface`.
//!
//! Hardware-independent; run tests with:
//! `cargo test -p textos-console --features std`

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod color;
mod console;

pub use color::Color;
pub use console::{Console, Theme, INPUT_START_ROW};

pub use textos_driver_traits::{COLS, GRID_SIZE, ROWS};
