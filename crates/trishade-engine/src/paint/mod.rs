//! Fill and clear colors.

mod color;

pub use color::Color;
