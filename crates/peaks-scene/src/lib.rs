//! Scene assembly and per-frame orchestration for the peaks renderer.

mod animation;
mod scene;
mod scope;

pub use animation::BlendAnimation;
pub use scene::{SceneError, SceneParams, SceneRenderer};
pub use scope::{BindingState, DrawScope};
