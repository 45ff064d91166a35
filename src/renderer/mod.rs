//! WebGPU rendering module
//!
//! Goats are tessellated on the CPU into colored triangles and drawn in one pass.

pub mod goat;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use goat::goat_scene;
pub use pipeline::RenderState;
pub use vertex::Vertex;
