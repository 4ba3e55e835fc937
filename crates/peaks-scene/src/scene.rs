//! The height-field scene: owns every GPU resource the frame loop touches
//! and drives one frame from surface acquisition to submission.

use peaks_render::{
    DepthBuffer, FrameEncoder, FrameUniform, HeightFieldPipeline, HeightImage, HeightTexture,
    LatticeBuffer, OrbitCamera, RenderContext, RenderPassBuilder, ShaderError, SurfaceError,
    TextureError,
};

use crate::animation::BlendAnimation;
use crate::scope::{BindingState, DrawScope};

/// Errors that can occur while assembling the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("height texture creation failed: {0}")]
    Texture(#[from] TextureError),

    #[error("shader setup failed: {0}")]
    Shader(#[from] ShaderError),
}

/// Scene construction parameters, resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SceneParams {
    /// Lattice points per side.
    pub lattice_size: u32,
    /// Elevation multiplier for sampled intensity.
    pub height_scale: f32,
    /// Eye distance from the lattice center.
    pub camera_distance: f32,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
}

/// Owns the pipeline, textures, lattice, camera, and animation, and renders
/// one frame per call.
pub struct SceneRenderer {
    pipeline: HeightFieldPipeline,
    texture_bind_group: wgpu::BindGroup,
    lattice: LatticeBuffer,
    depth: DepthBuffer,
    camera: OrbitCamera,
    animation: BlendAnimation,
    binding_state: BindingState,
    /// Whether two distinct images were supplied. With one image the blend
    /// factor is pinned to zero and the animation never advances.
    blended: bool,
    lattice_size: u32,
    height_scale: f32,
    image_size: (u32, u32),
}

impl SceneRenderer {
    /// Build the scene from one or two decoded height images.
    ///
    /// With `image_b` absent the first image fills both texture slots, so
    /// the shader's blend collapses to the first image at any factor.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        params: SceneParams,
        image_a: &HeightImage,
        image_b: Option<&HeightImage>,
    ) -> Result<Self, SceneError> {
        let pipeline = HeightFieldPipeline::new(device, surface_format, Some(DepthBuffer::FORMAT))?;

        let texture_a = HeightTexture::from_image(device, queue, "height-a", image_a)?;
        let blended = image_b.is_some();
        let texture_bind_group = match image_b {
            Some(image_b) => {
                let texture_b = HeightTexture::from_image(device, queue, "height-b", image_b)?;
                pipeline.create_texture_bind_group(device, &texture_a, &texture_b)
            }
            None => pipeline.create_texture_bind_group(device, &texture_a, &texture_a),
        };

        let vertices = peaks_render::build(params.lattice_size);
        let lattice = LatticeBuffer::upload(device, "lattice", &vertices);
        log::info!(
            "Scene ready: {0}x{0} lattice, {1} point(s), blending {2}",
            params.lattice_size,
            lattice.vertex_count,
            if blended { "two images" } else { "disabled" }
        );

        let depth = DepthBuffer::new(device, width, height);
        let camera = OrbitCamera::new(
            params.camera_distance,
            params.fov_y_degrees,
            width as f32 / height.max(1) as f32,
        );

        Ok(Self {
            pipeline,
            texture_bind_group,
            lattice,
            depth,
            camera,
            animation: BlendAnimation::new(),
            binding_state: BindingState::new(),
            blended,
            lattice_size: params.lattice_size,
            height_scale: params.height_scale,
            image_size: (image_a.width, image_a.height),
        })
    }

    /// Advance the crossfade animation. No-op in the one-image variant.
    pub fn advance(&mut self, elapsed_ms: f32) {
        if self.blended {
            self.animation.advance(elapsed_ms);
        }
    }

    /// The blend factor the next frame will use.
    pub fn blend_factor(&self) -> f32 {
        if self.blended {
            self.animation.blend_factor()
        } else {
            0.0
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Resize the depth buffer and camera aspect after a window resize.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width.max(1), height.max(1));
        self.camera.set_aspect_ratio(width as f32, height as f32);
    }

    fn frame_uniform(&self) -> FrameUniform {
        FrameUniform {
            view_proj: self.camera.view_projection_matrix().to_cols_array_2d(),
            image_size: [self.image_size.0 as f32, self.image_size.1 as f32],
            lattice_size: [self.lattice_size as f32, self.lattice_size as f32],
            blend: self.blend_factor(),
            height_scale: self.height_scale,
            _pad: [0.0; 2],
        }
    }

    /// Render one frame to the context's surface.
    pub fn render(&mut self, ctx: &RenderContext) -> Result<(), SurfaceError> {
        let surface_texture = ctx.get_current_texture()?;

        self.pipeline.write_frame(&ctx.queue, &self.frame_uniform());

        let mut frame = FrameEncoder::new(&ctx.device, ctx.queue.clone(), surface_texture);
        {
            let _scope = DrawScope::enter(&self.binding_state);
            let builder = RenderPassBuilder::new()
                .depth(
                    self.depth
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default()),
                    DepthBuffer::CLEAR_VALUE,
                )
                .label("height-field-pass");
            let mut pass = frame.begin_render_pass(&builder);
            pass.set_pipeline(&self.pipeline.pipeline);
            pass.set_bind_group(0, self.pipeline.frame_bind_group(), &[]);
            pass.set_bind_group(1, &self.texture_bind_group, &[]);
            self.lattice.bind(&mut pass);
            self.lattice.draw(&mut pass);
        }
        frame.submit();
        Ok(())
    }
}
