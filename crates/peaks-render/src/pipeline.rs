//! The height-field point pipeline.
//!
//! One WGSL module carries both stages. The vertex stage samples the two
//! height textures at the lattice-derived lookup coordinate, scales the
//! blended intensity into an elevation, and projects the displaced point;
//! the fragment stage blends the two sampled intensities by the same blend
//! factor, keeping color and geometry in lockstep.
//!
//! All per-frame values travel in one [`FrameUniform`] written to a single
//! uniform buffer — bindings are fixed indices validated at pipeline
//! creation, so a renamed or missing shader binding fails at startup rather
//! than silently at draw time.

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use crate::lattice::LatticeVertex;
use crate::shader::{self, ShaderError};
use crate::texture::HeightTexture;

/// Per-frame uniform data for the height-field pass.
///
/// Layout matches the WGSL `FrameUniform` struct; keep the two in sync.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniform {
    /// Combined projection * view * model transform.
    pub view_proj: [[f32; 4]; 4],
    /// Source image dimensions in texels (width, height).
    pub image_size: [f32; 2],
    /// Lattice dimensions in points (npw, nph).
    pub lattice_size: [f32; 2],
    /// Blend factor in [0, 1] between the two height textures.
    pub blend: f32,
    /// Elevation multiplier for sampled intensity.
    pub height_scale: f32,
    pub _pad: [f32; 2],
}

/// The WGSL source for the height-field point shader.
pub const HEIGHT_FIELD_SHADER_SOURCE: &str = r#"
struct FrameUniform {
    view_proj: mat4x4<f32>,
    image_size: vec2<f32>,
    lattice_size: vec2<f32>,
    blend: f32,
    height_scale: f32,
};

@group(0) @binding(0)
var<uniform> frame: FrameUniform;

@group(1) @binding(0) var height_a: texture_2d<f32>;
@group(1) @binding(1) var height_b: texture_2d<f32>;
@group(1) @binding(2) var height_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) intensity_a: f32,
    @location(1) intensity_b: f32,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VertexOutput {
    // Map the lattice coordinate into normalized texture space, then clamp
    // to texel centers so edge lookups don't filter past the image border.
    let uv = (position.xy + frame.lattice_size * 0.5) / frame.lattice_size;
    let half_texel = vec2<f32>(0.5) / frame.image_size;
    let lookup = clamp(uv, half_texel, vec2<f32>(1.0) - half_texel);

    let a = textureSampleLevel(height_a, height_sampler, lookup, 0.0).r;
    let b = textureSampleLevel(height_b, height_sampler, lookup, 0.0).r;
    let elevation = mix(a, b, frame.blend) * frame.height_scale;

    var out: VertexOutput;
    out.clip_position = frame.view_proj * vec4<f32>(position.xy, elevation, 1.0);
    out.intensity_a = a;
    out.intensity_b = b;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Same blend factor as the elevation above - color and geometry move
    // together.
    let shade = mix(in.intensity_a, in.intensity_b, frame.blend);
    return vec4<f32>(shade, shade, shade, 1.0);
}
"#;

/// Point-list render pipeline for the height field, with its frame uniform
/// buffer and bind group layouts.
pub struct HeightFieldPipeline {
    pub pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl HeightFieldPipeline {
    /// Compile, link, and allocate everything the pass needs.
    ///
    /// Fails with [`ShaderError`] when the WGSL is rejected or the pipeline
    /// cannot be created against the declared layouts; both are fatal
    /// startup errors.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Result<Self, ShaderError> {
        let shader = shader::compile(device, "height-field", HEIGHT_FIELD_SHADER_SOURCE)?;

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("frame-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(
                            std::mem::size_of::<FrameUniform>() as u64
                        ),
                    },
                    count: None,
                }],
            });

        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("height-texture-bind-group-layout"),
                entries: &[
                    texture_entry(0),
                    texture_entry(1),
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("height-field-pipeline-layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &texture_bind_group_layout],
            immediate_size: 0,
        });

        let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = shader::link_scope(device, "height-field", || {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("height-field-pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[LatticeVertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::PointList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None, // points have no winding
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None, // opaque
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multiview_mask: None,
                cache: None,
            })
        })?;

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame-uniform"),
            size: std::mem::size_of::<FrameUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame-bind-group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let sampler = HeightTexture::create_sampler(device);

        Ok(Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            texture_bind_group_layout,
            sampler,
        })
    }

    /// Build the bind group placing texture `a` at binding 0 and `b` at
    /// binding 1 — the fixed unit assignment the shader expects. For the
    /// one-image variant, pass the same texture twice.
    pub fn create_texture_bind_group(
        &self,
        device: &wgpu::Device,
        a: &HeightTexture,
        b: &HeightTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("height-texture-bind-group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&a.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&b.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Write this frame's uniform values.
    pub fn write_frame(&self, queue: &wgpu::Queue, uniform: &FrameUniform) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// The bind group holding the frame uniform (group 0).
    pub fn frame_bind_group(&self) -> &wgpu::BindGroup {
        &self.frame_bind_group
    }
}
