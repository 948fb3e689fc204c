use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use geoforge_geo::{CellId, SelectionBox};

use crate::camera::CameraUniform;
use crate::config::RenderConfig;
use crate::paint::ColorTable;
use crate::render::{RenderCtx, RenderSelection, RenderTarget};

use super::atlas::{AtlasImage, NsweAtlas};
use super::draw::CellDraw;
use super::geometry::CellGeometry;

/// Per-frame view inputs, threaded explicitly through the draw path instead
/// of living in global driver state.
#[derive(Debug, Clone)]
pub struct FrameView {
    pub camera: CameraUniform,
    /// Active selection box, if the user is dragging one.
    pub selection_box: Option<SelectionBox>,
    /// Cell currently selected in the editor UI.
    pub ui_selected: Option<CellId>,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CellInstance {
    translation: [f32; 3],
    color: [f32; 4],
}

impl CellInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        2 => Float32x3, // translation
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CellInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const UV_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 3) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

fn uv_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: (std::mem::size_of::<f32>() * 2) as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &UV_ATTRS,
    }
}

/// Straight-alpha blending; policy colors are not premultiplied.
fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Cell-geometry renderer.
///
/// `init` builds the combined wall-configuration geometry once and uploads it
/// as three immutable device buffers; `render` then issues one indexed draw
/// per visible cell, selecting the sub-buffer matching the cell's size and
/// NSWE configuration. Per-cell color and translation travel in an instance
/// buffer rebuilt each frame.
pub struct CellRenderer {
    config: RenderConfig,
    colors: ColorTable,

    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    camera_ubo: Option<wgpu::Buffer>,

    index_buffer: Option<wgpu::Buffer>,
    position_buffer: Option<wgpu::Buffer>,
    uv_buffer: Option<wgpu::Buffer>,

    instance_buffer: Option<wgpu::Buffer>,
    instance_capacity: usize,

    // Per-frame scratch, reused to avoid reallocation.
    instances: Vec<CellInstance>,
}

impl CellRenderer {
    pub const NAME: &'static str = "cell-vbo";

    pub fn new(config: RenderConfig) -> Self {
        let colors = ColorTable::from_config(&config.colors);
        Self {
            config,
            colors,
            pipeline: None,
            bind_group: None,
            camera_ubo: None,
            index_buffer: None,
            position_buffer: None,
            uv_buffer: None,
            instance_buffer: None,
            instance_capacity: 0,
            instances: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn is_initialized(&self) -> bool {
        self.pipeline.is_some()
    }

    /// One-time initialization: geometry build + upload, atlas, pipeline.
    ///
    /// Any device error aborts initialization and releases everything that
    /// was created; no stale handles survive a failed init.
    pub fn init(&mut self, ctx: &RenderCtx<'_>, atlas: &AtlasImage) -> Result<()> {
        debug_assert!(!self.is_initialized(), "init called twice");

        if let Err(err) = self.try_init(ctx, atlas) {
            self.dispose();
            return Err(err);
        }
        Ok(())
    }

    fn try_init(&mut self, ctx: &RenderCtx<'_>, atlas: &AtlasImage) -> Result<()> {
        let geometry = CellGeometry::build();
        self.upload_geometry(ctx, &geometry)?;

        let atlas = NsweAtlas::upload(ctx, atlas)?;
        self.create_pipeline(ctx, &atlas);

        log::info!(
            "cell renderer initialized: {} indices, {} position floats",
            geometry.indices.len(),
            geometry.positions.len()
        );
        Ok(())
    }

    /// Uploads the combined geometry as immutable device buffers inside a
    /// wgpu error scope, so creation/upload failures become hard errors
    /// instead of deferred validation noise.
    fn upload_geometry(&mut self, ctx: &RenderCtx<'_>, geometry: &CellGeometry) -> Result<()> {
        let validation_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let oom_scope = ctx.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        self.index_buffer = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("geoforge cell index buffer"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));

        self.position_buffer = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("geoforge cell position buffer"),
                contents: bytemuck::cast_slice(&geometry.positions),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));

        self.uv_buffer = Some(ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("geoforge cell uv buffer"),
                contents: bytemuck::cast_slice(&geometry.uvs),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));

        self.camera_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("geoforge cell camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));

        let oom = pollster::block_on(oom_scope.pop());
        let validation = pollster::block_on(validation_scope.pop());
        if let Some(err) = oom.or(validation) {
            anyhow::bail!("cell geometry upload failed: {err}");
        }
        Ok(())
    }

    fn create_pipeline(&mut self, ctx: &RenderCtx<'_>, atlas: &NsweAtlas) {
        let shader_src = include_str!("shaders/cell.wgsl");
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("geoforge cell shader"),
                source: wgpu::ShaderSource::Wgsl(shader_src.into()),
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("geoforge cell bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: std::num::NonZeroU64::new(
                                    std::mem::size_of::<CameraUniform>() as u64,
                                ),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("geoforge cell pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("geoforge cell pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[position_layout(), uv_layout(), CellInstance::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
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

                // Transparent cells; the caller supplies back-to-front order,
                // so no depth buffer is attached.
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            });

        // `camera_ubo` is created by `upload_geometry`, which always runs
        // first in `try_init`.
        let Some(camera_ubo) = self.camera_ubo.as_ref() else {
            return;
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("geoforge cell bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
    }

    /// Draws every cell in `selection`, strictly in the order supplied.
    ///
    /// Calling this before a successful `init` is a contract violation:
    /// debug-asserted, a no-op in release builds.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        selection: &RenderSelection,
        frame: &FrameView,
    ) {
        debug_assert!(self.is_initialized(), "render called before init");
        if !self.is_initialized() || selection.is_empty() {
            return;
        }

        // Resolve per-cell color and translation in caller order.
        self.instances.clear();
        for cell in selection.iter() {
            let inside = frame
                .selection_box
                .is_some_and(|b| b.contains(cell.render_pos()));
            let ui_selected = frame.ui_selected == Some(cell.id());
            let color = self.colors.color_for(cell, inside, ui_selected);

            self.instances.push(CellInstance {
                translation: cell.render_pos().to_array(),
                color: color.to_array(),
            });
        }

        self.ensure_instance_capacity(ctx, self.instances.len());

        let Some(camera_ubo) = self.camera_ubo.as_ref() else { return };
        let Some(instance_buffer) = self.instance_buffer.as_ref() else { return };
        ctx.queue
            .write_buffer(camera_ubo, 0, bytemuck::bytes_of(&frame.camera));
        ctx.queue
            .write_buffer(instance_buffer, 0, bytemuck::cast_slice(&self.instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(index_buffer) = self.index_buffer.as_ref() else { return };
        let Some(position_buffer) = self.position_buffer.as_ref() else { return };
        let Some(uv_buffer) = self.uv_buffer.as_ref() else { return };

        let mut rpass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("geoforge cell pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, position_buffer.slice(..));
        rpass.set_vertex_buffer(1, uv_buffer.slice(..));
        rpass.set_vertex_buffer(2, instance_buffer.slice(..));

        if !self.config.draw_range {
            rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        }

        for (i, cell) in selection.iter().enumerate() {
            let draw = CellDraw::for_cell(cell);
            let instance = i as u32..i as u32 + 1;

            if self.config.draw_range {
                // Narrowed binding declares the touched index window to the
                // driver; geometry is identical to the plain path.
                rpass.set_index_buffer(
                    index_buffer.slice(draw.byte_range()),
                    wgpu::IndexFormat::Uint16,
                );
                rpass.draw_indexed(0..draw.index_count, 0, instance);
            } else {
                rpass.draw_indexed(draw.index_range(), 0, instance);
            }
        }
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_buffer.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<CellInstance>()) as u64;

        self.instance_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("geoforge cell instance buffer"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }

    /// Releases all device resources together; the three geometry buffers
    /// share this single release path.
    pub fn dispose(&mut self) {
        self.pipeline = None;
        self.bind_group = None;
        self.camera_ubo = None;
        self.index_buffer = None;
        self.position_buffer = None;
        self.uv_buffer = None;
        self.instance_buffer = None;
        self.instance_capacity = 0;
        self.instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let r = CellRenderer::new(RenderConfig::default());
        assert!(!r.is_initialized());
        assert_eq!(r.name(), "cell-vbo");
    }

    #[test]
    fn dispose_clears_everything() {
        let mut r = CellRenderer::new(RenderConfig::default());
        r.dispose();
        assert!(!r.is_initialized());
        assert_eq!(r.instance_capacity, 0);
    }

    #[test]
    fn instance_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<CellInstance>(), 28);
        assert_eq!(CellInstance::ATTRS[1].offset, 12);
    }
}
