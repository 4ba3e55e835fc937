//! GPU rendering primitives for the peaks height-field renderer.

mod camera;
mod depth;
mod gpu;
mod lattice;
mod pass;
mod pipeline;
mod shader;
mod texture;

pub use camera::OrbitCamera;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use lattice::{LatticeBuffer, LatticeVertex, build, texture_lookup};
pub use pass::{CLEAR_GRAY, FrameEncoder, RenderPassBuilder};
pub use pipeline::{FrameUniform, HEIGHT_FIELD_SHADER_SOURCE, HeightFieldPipeline};
pub use shader::{ShaderError, compile};
pub use texture::{HeightImage, HeightTexture, TextureError};
