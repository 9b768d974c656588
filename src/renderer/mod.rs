//! 2D rendering module
//!
//! Everything is tessellated on the CPU into flat-colored triangles
//! (`FrameBuilder`), then uploaded in one draw call per frame.

pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::FrameBuilder;
#[cfg(target_arch = "wasm32")]
pub use pipeline::RenderState;
pub use vertex::Vertex;
