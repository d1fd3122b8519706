//! WebGPU rendering module
//!
//! The scene is built on the CPU as a colored triangle list in canvas pixels,
//! then mapped to the surface and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use pipeline::{RenderError, RenderState};
pub use scene::build_frame;
pub use vertex::Vertex;
pub use viewport::Viewport;
