//! # Rendering Module
//!
//! Macroquad-based presentation of the session snapshot. Strictly a
//! consumer: it reads state, drains transient hit events, and never touches
//! the simulation.

pub mod display;

pub use display::*;
