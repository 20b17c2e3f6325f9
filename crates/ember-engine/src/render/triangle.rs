use anyhow::Result;
use wgpu::util::DeviceExt;

use ember_shader::LinkedProgram;

use crate::render::vertex::TRIANGLE;
use crate::render::{CommandList, GpuProgram, RenderCtx, RenderTarget};

/// Owns the triangle's vertex buffer and the active program, and executes a
/// frame's [`CommandList`] against them.
pub struct TriangleRenderer {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    program: Option<GpuProgram>,
    warned_no_program: bool,
}

impl TriangleRenderer {
    /// Uploads [`TRIANGLE`] once. The buffer is vertex-only and never rewritten.
    pub fn new(device: &wgpu::Device) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ember triangle vbo"),
            contents: bytemuck::cast_slice(&TRIANGLE),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: TRIANGLE.len() as u32,
            program: None,
            warned_no_program: false,
        }
    }

    /// Builds the pipeline for `program` and makes it the one used by draws.
    ///
    /// On failure the active program is left unchanged.
    pub fn use_program(&mut self, ctx: &RenderCtx<'_>, program: &LinkedProgram) -> Result<()> {
        let gpu_program = GpuProgram::new(ctx.device, ctx.surface_format, program)?;
        self.program = Some(gpu_program);
        self.warned_no_program = false;
        Ok(())
    }

    #[inline]
    pub fn has_program(&self) -> bool {
        self.program.is_some()
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Drops the active program. Subsequent draws are skipped.
    pub fn release_program(&mut self) {
        if self.program.take().is_some() {
            log::debug!("released shader program");
        }
    }

    /// Records `cmds` into one render pass on `target`.
    ///
    /// The last `Clear` becomes the pass load op; without one the previous
    /// contents are loaded. `Draw` commands are skipped (one-time warning)
    /// while no program is active.
    pub fn execute(&mut self, target: &mut RenderTarget<'_>, cmds: &CommandList) {
        let load = match cmds.clear_color() {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ember frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        let Some(program) = self.program.as_ref() else {
            if cmds.draws().next().is_some() && !self.warned_no_program {
                log::warn!("draw requested without an active shader program; skipped");
                self.warned_no_program = true;
            }
            return;
        };

        rpass.set_pipeline(program.pipeline());
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for vertices in cmds.draws() {
            let end = vertices.end.min(self.vertex_count);
            let vertices = vertices.start.min(end)..end;
            if !vertices.is_empty() {
                rpass.draw(vertices, 0..1);
            }
        }
    }
}

impl Drop for TriangleRenderer {
    fn drop(&mut self) {
        self.release_program();
        self.vertex_buffer.destroy();
    }
}

