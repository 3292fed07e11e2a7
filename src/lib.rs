//! BANAMATIX - Banana Arithmetic Puzzle Game Library
//!
//! This module exposes the game logic for testing and external use.

pub mod config;
pub mod constants;
pub mod economy;
pub mod game;
pub mod notice;
pub mod puzzle;
pub mod session;
pub mod sync;
pub mod themes;
pub mod utils;
