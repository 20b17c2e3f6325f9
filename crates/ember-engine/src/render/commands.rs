use std::ops::Range;

use crate::paint::Color;

/// One recorded frame operation.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCmd {
    /// Clear the color target.
    Clear(Color),
    /// Draw `vertices` from the bound vertex buffer as a triangle list.
    Draw { vertices: Range<u32> },
}

/// Command stream recorded for a single frame.
///
/// Renderer-agnostic: recording never touches the GPU, so the per-frame
/// sequence can be inspected directly. Keeps capacity across frames.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandList {
    cmds: Vec<FrameCmd>,
}

impl CommandList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded commands. Keeps allocated capacity for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn clear(&mut self, color: Color) {
        self.cmds.push(FrameCmd::Clear(color));
    }

    #[inline]
    pub fn draw(&mut self, vertices: Range<u32>) {
        self.cmds.push(FrameCmd::Draw { vertices });
    }

    #[inline]
    pub fn commands(&self) -> &[FrameCmd] {
        &self.cmds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Color of the last `Clear`, which becomes the pass load op.
    pub fn clear_color(&self) -> Option<Color> {
        self.cmds.iter().rev().find_map(|c| match c {
            FrameCmd::Clear(color) => Some(*color),
            FrameCmd::Draw { .. } => None,
        })
    }

    /// Vertex ranges of every `Draw`, in recording order.
    pub fn draws(&self) -> impl Iterator<Item = Range<u32>> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            FrameCmd::Draw { vertices } => Some(vertices.clone()),
            FrameCmd::Clear(_) => None,
        })
    }
}
