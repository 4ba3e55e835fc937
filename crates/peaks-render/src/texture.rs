//! Single-channel height textures sampled by the vertex shader.
//!
//! A [`HeightTexture`] wraps one decoded grayscale bitmap as an `R8Unorm`
//! GPU texture with linear filtering and no mipmaps — the lattice resolution
//! is fixed and coarse, so a mip chain buys nothing. Textures are created
//! once before the frame loop and never mutated after upload.

/// A decoded single-channel bitmap: one intensity byte per texel.
///
/// This is the narrow interface between image decoding (done by the host)
/// and the renderer; no file I/O happens on this side of it.
#[derive(Debug, Clone)]
pub struct HeightImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl HeightImage {
    /// CPU reference for the shader's filtered height lookup.
    ///
    /// Samples the image at normalized coordinates with bilinear filtering
    /// and clamp-to-edge addressing, returning intensity in `[0, 1]`.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> f32 {
        let w = self.width as f32;
        let h = self.height as f32;
        // Texel-center addressing: uv 0.5/w lands exactly on texel 0.
        let x = (u * w - 0.5).clamp(0.0, w - 1.0);
        let y = (v * h - 0.5).clamp(0.0, h - 1.0);
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let at = |px: u32, py: u32| -> f32 {
            self.pixels[(py * self.width + px) as usize] as f32 / 255.0
        };

        let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
        let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

/// Errors that can occur during height texture creation.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Pixel data length doesn't match the image dimensions (one byte per texel).
    #[error("height data size ({actual}) does not match expected ({expected}) for {width}x{height}")]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    /// Width or height is zero.
    #[error("height texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// A GPU-resident single-channel height texture.
pub struct HeightTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub dimensions: (u32, u32),
}

impl HeightTexture {
    /// Intensity bytes upload as normalized floats the shader reads from `.r`.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;

    /// Create and upload a height texture from a decoded grayscale image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        image: &HeightImage,
    ) -> Result<Self, TextureError> {
        let (width, height) = (image.width, image.height);
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroDimensions { width, height });
        }
        let expected = width as usize * height as usize;
        if image.pixels.len() != expected {
            return Err(TextureError::DataSizeMismatch {
                actual: image.pixels.len(),
                expected,
                width,
                height,
            });
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        log::info!("Created height texture '{label}' ({width}x{height})");
        Ok(Self {
            texture,
            view,
            dimensions: (width, height),
        })
    }

    /// The shared linear sampler used for all height lookups.
    pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("height-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        })
    }
}

/// Create a test GPU device and queue. Returns `None` if no GPU is available.
#[cfg(test)]
pub(crate) fn create_test_device_queue() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;

        adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .ok()
    })
}
