//! TEXTOS Shell
//!
//! Everything between a keystroke and a command's effect: the line-editing
//! input pipeline, the tokenizer, the typed command parser, the stateful
//! built-ins (tic-tac-toe, variable store, calculator), and the `Session`
//! that ties them to a console.
//!
//! Hardware-independent; run tests with:
//! `cargo test -p textos-shell --features std`

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod calc;
pub mod command;
pub mod game;
pub mod input;
pub mod session;
pub mod tokenizer;
pub mod vars;

pub use session::{Exec, Session, SystemFacts};
