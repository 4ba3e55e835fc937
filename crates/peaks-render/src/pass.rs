//! Render pass configuration and per-frame command encoding.
//!
//! [`RenderPassBuilder`] describes the single height-field pass;
//! [`FrameEncoder`] owns the command encoder and surface texture for one
//! frame and guarantees submission on every exit path — an abandoned
//! encoder would leave the next frame's GPU state inconsistent.

/// The reference mid-gray background.
pub const CLEAR_GRAY: wgpu::Color = wgpu::Color {
    r: 0.3,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Configuration for the depth attachment.
#[derive(Debug)]
struct DepthAttachmentConfig {
    view: wgpu::TextureView,
    clear_value: f32,
}

/// Builder for the frame's render pass descriptor.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth_attachment: Option<DepthAttachmentConfig>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    /// Create a builder clearing to the reference mid-gray.
    pub fn new() -> Self {
        Self {
            clear_color: CLEAR_GRAY,
            depth_attachment: None,
            label: None,
        }
    }

    /// Set the clear color for the color attachment.
    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a depth buffer cleared to the given value.
    pub fn depth(mut self, view: wgpu::TextureView, clear_value: f32) -> Self {
        self.depth_attachment = Some(DepthAttachmentConfig { view, clear_value });
        self
    }

    /// Set a debug label for the render pass.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn create_render_pass<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_attachment
                .as_ref()
                .map(|depth| wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(depth.clear_value),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// Owns one frame's command encoder and surface texture.
///
/// Consuming [`submit`](Self::submit) is the normal path; dropping an
/// unsubmitted encoder submits and presents anyway so a panic mid-frame
/// cannot wedge the swapchain.
pub struct FrameEncoder {
    encoder: Option<wgpu::CommandEncoder>,
    queue: wgpu::Queue,
    surface_texture: Option<wgpu::SurfaceTexture>,
    surface_view: Option<wgpu::TextureView>,
    submitted: bool,
}

impl FrameEncoder {
    /// Create a new frame encoder for the given surface texture.
    pub fn new(
        device: &wgpu::Device,
        queue: wgpu::Queue,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder: Some(encoder),
            queue,
            surface_texture: Some(surface_texture),
            surface_view: Some(surface_view),
            submitted: false,
        }
    }

    /// Begin the render pass described by `builder` against the surface.
    pub fn begin_render_pass<'a>(
        &'a mut self,
        builder: &'a RenderPassBuilder,
    ) -> wgpu::RenderPass<'a> {
        let view = self
            .surface_view
            .as_ref()
            .expect("FrameEncoder already submitted");

        builder.create_render_pass(
            self.encoder
                .as_mut()
                .expect("FrameEncoder already submitted"),
            view,
        )
    }

    /// Submit the command buffer and present the surface texture.
    /// Consumes self to prevent double-submission.
    pub fn submit(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.submitted {
            return;
        }
        if let (Some(encoder), Some(surface_texture)) =
            (self.encoder.take(), self.surface_texture.take())
        {
            self.queue.submit([encoder.finish()]);
            surface_texture.present();
            self.submitted = true;
        }
    }
}

impl Drop for FrameEncoder {
    fn drop(&mut self) {
        if !self.submitted {
            log::warn!("FrameEncoder dropped without explicit submit() - auto-submitting");
            self.finish();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clear_is_reference_gray() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color.r, 0.3);
        assert_eq!(builder.clear_color.g, 0.3);
        assert_eq!(builder.clear_color.b, 0.3);
        assert_eq!(builder.clear_color.a, 1.0);
    }

    #[test]
    fn test_clear_color_override() {
        let builder = RenderPassBuilder::new().clear_color(wgpu::Color::BLACK);
        assert_eq!(builder.clear_color.r, 0.0);
    }

    #[test]
    fn test_depth_attachment_is_optional() {
        let builder = RenderPassBuilder::new();
        assert!(builder.depth_attachment.is_none());
    }

    #[test]
    fn test_label_is_stored() {
        let builder = RenderPassBuilder::new().label("height-field-pass");
        assert_eq!(builder.label, Some("height-field-pass"));
    }
}
