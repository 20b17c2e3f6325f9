use std::borrow::Cow;

use anyhow::{bail, Result};
use ember_shader::{LinkedProgram, ShaderStage};

use crate::render::vertex::Vertex;

/// GPU side of a linked shader program: one render pipeline.
///
/// Both stage modules are created, baked into the pipeline, and dropped;
/// the pipeline keeps what it needs.
pub struct GpuProgram {
    pipeline: wgpu::RenderPipeline,
}

impl GpuProgram {
    /// Creates the pipeline for `program`, targeting `format`.
    ///
    /// `program` should have been linked against [`Vertex::attributes`]. Any
    /// validation error the device still raises is returned instead of reaching
    /// the uncaptured error handler.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        program: &LinkedProgram,
    ) -> Result<Self> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vs = create_module(device, program, ShaderStage::Vertex);
        let fs = create_module(device, program, ShaderStage::Fragment);

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ember program layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("ember program"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(program.vertex().entry_point()),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(program.fragment().entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
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

        // Native backends resolve the scope immediately.
        if let Some(err) = pollster::block_on(scope.pop()) {
            bail!("render pipeline rejected by the device: {err}");
        }

        log::debug!(
            "created pipeline `{}` + `{}` for {format:?}",
            program.vertex().entry_point(),
            program.fragment().entry_point()
        );

        Ok(Self { pipeline })
    }

    #[inline]
    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

fn create_module(
    device: &wgpu::Device,
    program: &LinkedProgram,
    stage: ShaderStage,
) -> wgpu::ShaderModule {
    let label = match stage {
        ShaderStage::Vertex => "ember vertex stage",
        ShaderStage::Fragment => "ember fragment stage",
    };

    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(program.stage(stage).source())),
    })
}
