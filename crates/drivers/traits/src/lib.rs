//! Hardware Capability Traits for TEXTOS
//!
//! This crate defines the narrow interfaces the core logic needs from the
//! machine. Subsystems (console, shell) talk to these traits and never touch
//! ports or video memory directly, so they can run against in-memory fakes
//! on a host target.

#![no_std]

pub mod input;
pub mod video;

pub use input::*;
pub use video::*;
