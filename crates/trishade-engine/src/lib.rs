//! Trishade engine crate.
//!
//! Window runtime, GPU device and the flat-color mesh renderer used by the
//! `trishade` binary.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod window;
