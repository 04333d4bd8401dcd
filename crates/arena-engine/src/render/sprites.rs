use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::graphic::{Bitmap, BrushId};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, SpriteCmd};

use super::common::{
    premul_alpha_blend, viewport_ubo_min_binding_size, QuadVertex, ViewportUniform,
    QUAD_INDICES, QUAD_VERTICES,
};

/// Textured-quad renderer for `DrawCmd::Sprite`.
///
/// Each distinct brush bitmap is uploaded once and cached by [`BrushId`].
/// Textures not referenced for a frame are released at the end of that frame.
/// Bitmaps larger than the device's 2D texture limit are uploaded downscaled.
/// Consecutive sprites sharing a texture are drawn with one instanced call.
#[derive(Default)]
pub struct SpriteRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    viewport_bgl: Option<wgpu::BindGroupLayout>,
    texture_bgl: Option<wgpu::BindGroupLayout>,
    viewport_bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    textures: HashMap<BrushId, CachedTexture>,
    frame: u64,
}

struct CachedTexture {
    // Kept alive for the bind group.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    last_used: u64,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bitmaps currently resident on the GPU.
    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }

    /// Renders sprites contained in `draw_list` into `target`, in paint order.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.frame = self.frame.wrapping_add(1);

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);

        let batches = SpriteBatches::collect(draw_list);

        for (id, bitmap) in &batches.bitmaps {
            self.ensure_texture(ctx, *id, bitmap);
        }
        self.evict_unused();

        if batches.instances.is_empty() {
            return;
        }

        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, batches.instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&batches.instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(viewport_bind_group) = self.viewport_bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("arena sprite pass"),
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
        rpass.set_bind_group(0, viewport_bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for batch in &batches.runs {
            let Some(cached) = self.textures.get(&batch.brush) else { continue };
            rpass.set_bind_group(1, &cached.bind_group, &[]);
            rpass.draw_indexed(0..6, 0, batch.instances.clone());
        }
    }

    fn ensure_texture(&mut self, ctx: &RenderCtx<'_>, id: BrushId, bitmap: &Bitmap) {
        let frame = self.frame;
        if let Some(cached) = self.textures.get_mut(&id) {
            cached.last_used = frame;
            return;
        }

        let Some(bgl) = self.texture_bgl.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        let fitted = bitmap.fit_within(max_dimension);
        if let Some(fitted) = fitted.as_ref() {
            let (from, to) = (bitmap.pixel_size(), fitted.pixel_size());
            log::warn!(
                "sprite bitmap {}x{} exceeds the {max_dimension}px texture limit; uploading {}x{}",
                from.width, from.height, to.width, to.height
            );
        }
        let bitmap = fitted.as_ref().unwrap_or(bitmap);

        let size = bitmap.pixel_size();
        let extent = wgpu::Extent3d {
            width: size.width,
            height: size.height,
            depth_or_array_layers: 1,
        };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("arena sprite texture"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bitmap.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(size.width * 4),
                rows_per_image: Some(size.height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("arena sprite texture bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        log::debug!("uploaded sprite texture {id:?} ({}x{})", size.width, size.height);
        self.textures.insert(
            id,
            CachedTexture {
                _texture: texture,
                bind_group,
                last_used: frame,
            },
        );
    }

    fn evict_unused(&mut self) {
        let frame = self.frame;
        let before = self.textures.len();
        self.textures.retain(|_, cached| cached.last_used == frame);

        let evicted = before - self.textures.len();
        if evicted > 0 {
            log::debug!("released {evicted} unused sprite texture(s)");
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("arena sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let viewport_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("arena sprite viewport bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(viewport_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let texture_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("arena sprite texture bgl"),
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

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("arena sprite pipeline layout"),
            bind_group_layouts: &[&viewport_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("arena sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), SpriteInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mirrored transforms flip winding.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.viewport_bgl = Some(viewport_bgl);
        self.texture_bgl = Some(texture_bgl);

        // Bind groups belong to the old layouts.
        self.viewport_bind_group = None;
        self.viewport_ubo = None;
        self.textures.clear();
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_none() {
            self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("arena sprite sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }

        if self.viewport_bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.viewport_bgl.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arena sprite viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("arena sprite viewport bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.viewport_bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("arena sprite quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("arena sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        let u = ViewportUniform::from_size(ctx.size);
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required_instances: usize) {
        if required_instances <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required_instances.next_power_of_two().max(64);
        let new_size = (new_cap * std::mem::size_of::<SpriteInstance>()) as u64;

        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arena sprite instance vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── batching ──────────────────────────────────────────────────────────────

/// A run of consecutive instances sharing one texture.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    brush: BrushId,
    instances: Range<u32>,
}

/// CPU-side frame data: instances in paint order, their texture runs, and the
/// distinct bitmaps referenced.
#[derive(Default)]
struct SpriteBatches {
    instances: Vec<SpriteInstance>,
    runs: Vec<Batch>,
    bitmaps: Vec<(BrushId, std::sync::Arc<Bitmap>)>,
}

impl SpriteBatches {
    fn collect(draw_list: &mut DrawList) -> Self {
        let mut out = Self::default();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Sprite(cmd) = &item.cmd;
            let Some(instance) = SpriteInstance::from_cmd(cmd) else { continue };

            let id = cmd.brush.id();
            let index = out.instances.len() as u32;
            out.instances.push(instance);

            match out.runs.last_mut() {
                Some(run) if run.brush == id => run.instances.end = index + 1,
                _ => out.runs.push(Batch {
                    brush: id,
                    instances: index..index + 1,
                }),
            }

            if !out.bitmaps.iter().any(|(seen, _)| *seen == id) {
                out.bitmaps.push((id, cmd.brush.bitmap().clone()));
            }
        }

        out
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct SpriteInstance {
    row0: [f32; 2],
    row1: [f32; 2],
    offset: [f32; 2],
    size: [f32; 2], // native bitmap px
}

impl SpriteInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // row0
        2 => Float32x2, // row1
        3 => Float32x2, // offset
        4 => Float32x2  // size
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for commands that would paint nothing.
    fn from_cmd(cmd: &SpriteCmd) -> Option<Self> {
        let transform = cmd.transform();
        if cmd.footprint.is_empty() || !transform.is_finite() {
            return None;
        }

        let [row0, row1, offset] = transform.to_rows();
        let size = cmd.brush.pixel_size();
        Some(Self {
            row0,
            row1,
            offset,
            size: [size.width as f32, size.height as f32],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Affine2, PixelSize, Rect};
    use crate::graphic::Brush;
    use crate::render::RenderSurface;

    fn brush(w: u32, h: u32) -> Brush {
        Brush::new(Bitmap::solid(w, h, [255; 4]).unwrap())
    }

    fn fill(list: &mut DrawList, b: &Brush) {
        let t = Affine2::translation(10.0, 20.0);
        list.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), &b.with_transform(t));
    }

    #[test]
    fn consecutive_sprites_share_a_batch() {
        let (a, b) = (brush(4, 4), brush(2, 2));
        let mut list = DrawList::new(PixelSize::new(100, 100));
        fill(&mut list, &a);
        fill(&mut list, &a);
        fill(&mut list, &b);
        fill(&mut list, &a);

        let batches = SpriteBatches::collect(&mut list);
        let runs: Vec<(BrushId, Range<u32>)> =
            batches.runs.iter().map(|r| (r.brush, r.instances.clone())).collect();

        assert_eq!(runs, vec![(a.id(), 0..2), (b.id(), 2..3), (a.id(), 3..4)]);
        assert_eq!(batches.bitmaps.len(), 2);
    }

    #[test]
    fn batches_follow_paint_order_across_layers() {
        let (a, b) = (brush(4, 4), brush(2, 2));
        let mut list = DrawList::new(PixelSize::new(100, 100));
        list.begin_layer(1);
        fill(&mut list, &a);
        list.begin_layer(0);
        fill(&mut list, &b);

        let batches = SpriteBatches::collect(&mut list);
        assert_eq!(batches.runs[0].brush, b.id());
        assert_eq!(batches.runs[1].brush, a.id());
    }

    #[test]
    fn instance_carries_transform_rows_and_native_size() {
        let b = brush(8, 4);
        let cmd = SpriteCmd {
            footprint: Rect::new(0.0, 0.0, 16.0, 8.0),
            brush: b.with_transform(Affine2::scale(2.0, 2.0) * Affine2::translation(5.0, 6.0)),
        };

        let inst = SpriteInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.row0, [2.0, 0.0]);
        assert_eq!(inst.row1, [0.0, 2.0]);
        assert_eq!(inst.offset, [5.0, 6.0]);
        assert_eq!(inst.size, [8.0, 4.0]);
    }

    #[test]
    fn empty_footprints_are_dropped() {
        let cmd = SpriteCmd {
            footprint: Rect::new(0.0, 0.0, 0.0, 8.0),
            brush: brush(1, 1),
        };
        assert!(SpriteInstance::from_cmd(&cmd).is_none());
    }
}
