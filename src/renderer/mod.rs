//! Frame description module
//!
//! Turns the simulation state into screen-space draw commands. Presenting
//! them (window, fonts, GPU) is left to the embedding application.

pub mod frame;
pub mod shapes;

pub use frame::{DrawCommand, Frame, TextSize, build_frame};
