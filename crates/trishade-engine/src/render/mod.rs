//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into the
//! frame's encoder through a [`RenderTarget`].
//!
//! Convention: vertex positions are already in normalized device coordinates
//! (x/y in `[-1, 1]`, +Y up); shaders pass them through unchanged.

mod ctx;
mod mesh;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshId, MeshRenderer};
pub use vertex::Vertex;
