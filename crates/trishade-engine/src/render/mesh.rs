use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget, Vertex};

/// Handle to a mesh uploaded into a [`MeshRenderer`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MeshId(usize);

struct GpuMesh {
    label: String,
    vbo: wgpu::Buffer,
    vertex_count: u32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FillUniform {
    color: [f32; 4],
}

/// Draws static triangle lists with a single flat fill color.
///
/// Every mesh shares one pipeline (the vertex/fragment shader pair) and one
/// fill uniform. Meshes are drawn in upload order.
#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    fill_ubo: Option<wgpu::Buffer>,

    meshes: Vec<GpuMesh>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex count of an uploaded mesh, `None` for ids from another renderer.
    pub fn vertex_count(&self, id: MeshId) -> Option<u32> {
        self.meshes.get(id.0).map(|m| m.vertex_count)
    }

    /// Uploads `vertices` into a static vertex buffer.
    ///
    /// The slice is a triangle list: it must be non-empty and hold whole triangles.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, label: &str, vertices: &[Vertex]) -> Result<MeshId> {
        validate_triangle_list(label, vertices)?;

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("trishade mesh vbo: {label}")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let id = MeshId(self.meshes.len());
        self.meshes.push(GpuMesh {
            label: label.to_string(),
            vbo,
            vertex_count: vertices.len() as u32,
        });
        log::debug!(
            "uploaded mesh '{label}' ({} vertices) as {id:?}",
            vertices.len()
        );
        Ok(id)
    }

    /// Draws every uploaded mesh into `target` with `fill`.
    ///
    /// Loads the existing target contents; clearing is the caller's job.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, fill: Color) {
        if self.meshes.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);
        self.write_fill_uniform(ctx, fill);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("trishade mesh pass"),
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

        for mesh in &self.meshes {
            rpass.push_debug_group(&mesh.label);
            rpass.set_vertex_buffer(0, mesh.vbo.slice(..));
            rpass.draw(0..mesh.vertex_count, 0..1);
            rpass.pop_debug_group();
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("trishade flat shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/flat.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("trishade fill bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<FillUniform>() as u64,
                            ),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("trishade mesh pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("trishade mesh pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
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

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("built mesh pipeline for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings belong to the old layout.
        self.bind_group = None;
        self.fill_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.fill_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let fill_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trishade fill ubo"),
            size: std::mem::size_of::<FillUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trishade fill bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: fill_ubo.as_entire_binding(),
            }],
        });

        self.fill_ubo = Some(fill_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_fill_uniform(&self, ctx: &RenderCtx<'_>, fill: Color) {
        let Some(ubo) = self.fill_ubo.as_ref() else { return };
        let u = FillUniform {
            color: fill.for_target(ctx.surface_format).to_array(),
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

fn validate_triangle_list(label: &str, vertices: &[Vertex]) -> Result<()> {
    anyhow::ensure!(!vertices.is_empty(), "mesh '{label}' has no vertices");
    anyhow::ensure!(
        vertices.len() % 3 == 0,
        "mesh '{label}' has {} vertices; a triangle list needs a multiple of 3",
        vertices.len()
    );
    anyhow::ensure!(
        vertices.len() <= u32::MAX as usize,
        "mesh '{label}' is too large to draw"
    );
    anyhow::ensure!(
        vertices.iter().flat_map(|v| v.position).all(f32::is_finite),
        "mesh '{label}' has non-finite positions"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vertex; 3] {
        [
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn whole_triangles_are_accepted() {
        assert!(validate_triangle_list("tri", &tri()).is_ok());
        let six = [tri(), tri()].concat();
        assert!(validate_triangle_list("two", &six).is_ok());
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = validate_triangle_list("empty", &[]).unwrap_err();
        assert!(err.to_string().contains("no vertices"));
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let err = validate_triangle_list("bad", &tri()[..2]).unwrap_err();
        assert!(err.to_string().contains("multiple of 3"));
    }

    #[test]
    fn nan_position_is_rejected() {
        let mut verts = tri();
        verts[1].position[0] = f32::NAN;
        assert!(validate_triangle_list("nan", &verts).is_err());
    }

    #[test]
    fn fill_uniform_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<FillUniform>(), 16);
    }

    #[test]
    fn unknown_mesh_has_no_vertex_count() {
        let r = MeshRenderer::new();
        assert_eq!(r.vertex_count(MeshId(0)), None);
    }
}
