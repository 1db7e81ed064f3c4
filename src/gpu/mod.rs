//! wgpu renderer for the board decoration.
//!
//! One textured quad per board, rounded corners cut in the fragment shader,
//! fully transparent clear so the decoration composites over whatever the
//! host draws behind it. The surface is configured in physical pixels while
//! the projection stays in container logical coordinates, which is all the
//! device-pixel-ratio handling there is.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::textures::{TextureConfig, TextureRegistry};

/// Instance buffer capacity grows in chunks of this many boards.
const INSTANCE_CHUNK: usize = 32;

const SHADER_SOURCE: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var board_texture: texture_2d<f32>;
@group(1) @binding(1)
var board_sampler: sampler;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) half_extents: vec2<f32>,
    @location(2) corner_radius: f32,
    @location(3) uv: vec2<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) half_extents: vec2<f32>,
    @location(2) rotation: f32,
    @location(3) corner_radius: f32,
) -> VertexOutput {
    var quad = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad[vertex_index];
    let local = corner * half_extents;
    let c = cos(rotation);
    let s = sin(rotation);
    let rotated = vec2<f32>(local.x * c - local.y * s, local.x * s + local.y * c);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(center + rotated, 0.0, 1.0);
    out.local = local;
    out.half_extents = half_extents;
    out.corner_radius = corner_radius;
    out.uv = corner * vec2<f32>(0.5, 0.5) + vec2<f32>(0.5, 0.5);
    return out;
}

fn rounded_rect_distance(p: vec2<f32>, half: vec2<f32>, radius: f32) -> f32 {
    let q = abs(p) - half + vec2<f32>(radius, radius);
    return length(max(q, vec2<f32>(0.0, 0.0))) + min(max(q.x, q.y), 0.0) - radius;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(board_texture, board_sampler, in.uv);
    let d = rounded_rect_distance(in.local, in.half_extents, in.corner_radius);
    if d > 0.0 {
        discard;
    }
    let edge = 1.0 - smoothstep(-1.5, 0.0, d);
    return vec4<f32>(color.rgb, color.a * max(edge, 0.04));
}
"#;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

/// Per-board instance data, in container logical coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BoardInstance {
    pub center: [f32; 2],
    pub half_extents: [f32; 2],
    pub rotation: f32,
    pub corner_radius: f32,
}

pub struct BoardRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture_bind_groups: Vec<wgpu::BindGroup>,
    slots: Vec<String>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    logical_size: (f32, f32),
}

impl BoardRenderer {
    /// Bring up the full wgpu stack on the given window.
    ///
    /// Slot 0 is always the placeholder texture; one more slot is uploaded
    /// per texture id, resolved through the registry.
    pub async fn new(
        window: Arc<Window>,
        logical_size: (f32, f32),
        registry: &TextureRegistry,
        texture_ids: &[String],
    ) -> Result<Self, GpuError> {
        let physical = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("driftdeck device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        // A compositing alpha mode is what makes the transparent clear
        // actually show the page behind the surface; opaque is the fallback.
        let alpha_mode = surface_caps
            .alpha_modes
            .iter()
            .copied()
            .find(|mode| {
                matches!(
                    mode,
                    wgpu::CompositeAlphaMode::PreMultiplied
                        | wgpu::CompositeAlphaMode::PostMultiplied
                )
            })
            .unwrap_or(surface_caps.alpha_modes[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: physical.width.max(1),
            height: physical.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            view_proj: ortho_matrix(logical_size),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Board Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Board Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Board Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Board Pipeline Layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Board Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<BoardInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 16,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32,
                        },
                        wgpu::VertexAttribute {
                            offset: 20,
                            shader_location: 3,
                            format: wgpu::VertexFormat::Float32,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let instance_capacity = INSTANCE_CHUNK;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Board Instance Buffer"),
            size: (instance_capacity * std::mem::size_of::<BoardInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut renderer = Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            sampler,
            texture_bind_groups: Vec::new(),
            slots: Vec::new(),
            instance_buffer,
            instance_capacity,
            logical_size,
        };
        renderer.upload_textures(registry, texture_ids);
        Ok(renderer)
    }

    /// Slot index for a texture id; 0 (placeholder) when never uploaded.
    pub fn slot_for(&self, id: &str) -> u32 {
        self.slots
            .iter()
            .position(|slot| slot == id)
            .map(|i| (i + 1) as u32)
            .unwrap_or(0)
    }

    /// Reconfigure the surface for a new physical size and logical extent.
    pub fn resize(
        &mut self,
        physical: winit::dpi::PhysicalSize<u32>,
        logical_size: (f32, f32),
    ) {
        if physical.width == 0 || physical.height == 0 {
            return;
        }
        self.config.width = physical.width;
        self.config.height = physical.height;
        self.surface.configure(&self.device, &self.config);

        self.logical_size = logical_size;
        let uniforms = Uniforms {
            view_proj: ortho_matrix(logical_size),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Draw one frame: transparent clear, then every board in order.
    ///
    /// `boards` pairs instance data with the texture slot to bind for it.
    pub fn render(&mut self, boards: &[(BoardInstance, u32)]) -> Result<(), wgpu::SurfaceError> {
        self.ensure_instance_capacity(boards.len());

        let instances: Vec<BoardInstance> = boards.iter().map(|(inst, _)| *inst).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Board Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Board Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));

            for (i, (_, slot)) in boards.iter().enumerate() {
                let slot = (*slot as usize).min(self.texture_bind_groups.len() - 1);
                render_pass.set_bind_group(1, &self.texture_bind_groups[slot], &[]);
                render_pass.draw(0..6, i as u32..i as u32 + 1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn ensure_instance_capacity(&mut self, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        let capacity = count.div_ceil(INSTANCE_CHUNK) * INSTANCE_CHUNK;
        self.instance_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Board Instance Buffer"),
            size: (capacity * std::mem::size_of::<BoardInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.instance_capacity = capacity;
    }

    fn upload_textures(&mut self, registry: &TextureRegistry, texture_ids: &[String]) {
        let placeholder = TextureConfig::placeholder();
        self.texture_bind_groups = vec![self.upload_texture(&placeholder)];
        self.slots.clear();

        for id in texture_ids {
            let config = registry.resolve(id);
            self.texture_bind_groups.push(self.upload_texture(&config));
            self.slots.push(id.clone());
        }
    }

    fn upload_texture(&self, config: &TextureConfig) -> wgpu::BindGroup {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Board Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &config.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * config.width),
                rows_per_image: Some(config.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Board Texture Bind Group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

/// Projection mapping container logical coordinates (y-down, origin
/// top-left) onto clip space.
fn ortho_matrix(logical_size: (f32, f32)) -> [[f32; 4]; 4] {
    let (width, height) = (logical_size.0.max(1.0), logical_size.1.max(1.0));
    Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0).to_cols_array_2d()
}
