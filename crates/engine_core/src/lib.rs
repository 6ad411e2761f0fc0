//! Core engine types shared by the still-life viewer crates.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform for placing generated shapes and driving the camera pose
//! - Frame timing for the render loop

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;
