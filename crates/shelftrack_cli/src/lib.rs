//! Console front-end for ShelfTrack.
//!
//! The binary in `main.rs` is a thin wrapper; the menu lives here so it
//! can be driven by scripted input in tests.

pub mod cli;
pub mod config;
pub mod menu;
mod render;
