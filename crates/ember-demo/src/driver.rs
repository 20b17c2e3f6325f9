use ember_engine::core::AppControl;
use ember_engine::paint::Color;
use ember_engine::render::CommandList;

/// Lifecycle of the frame driver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Uninitialized,
    Running,
    Terminated,
}

/// Decides what each frame contains.
///
/// Holds no GPU state: it records a [`CommandList`] per frame and leaves
/// execution to the renderer, so the per-frame sequence is observable in tests.
#[derive(Debug)]
pub struct FrameDriver {
    phase: Phase,
    clear: Color,
    vertex_count: u32,
    draw_enabled: bool,
    frames: u64,
}

impl FrameDriver {
    pub fn new(clear: Color, vertex_count: u32) -> Self {
        Self {
            phase: Phase::Uninitialized,
            clear,
            vertex_count,
            draw_enabled: false,
            frames: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Frames recorded while running.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Enters `Running`. Without a program, frames are cleared but not drawn.
    pub fn start(&mut self, program_ready: bool) {
        if self.phase != Phase::Uninitialized {
            log::warn!("frame driver started twice; ignored");
            return;
        }
        self.draw_enabled = program_ready;
        self.phase = Phase::Running;
        log::debug!("frame driver running (draw enabled: {program_ready})");
    }

    /// Window close observed. Valid from any phase.
    pub fn close(&mut self) {
        if self.phase != Phase::Terminated {
            log::debug!("frame driver terminated after {} frame(s)", self.frames);
        }
        self.phase = Phase::Terminated;
    }

    /// Records the next frame into `cmds`: one clear, then one triangle draw
    /// when a program is active.
    ///
    /// Returns `AppControl::Exit` once terminated; nothing is recorded then.
    pub fn record_frame(&mut self, cmds: &mut CommandList) -> AppControl {
        cmds.reset();

        match self.phase {
            Phase::Uninitialized => AppControl::Continue,
            Phase::Terminated => AppControl::Exit,
            Phase::Running => {
                cmds.clear(self.clear);
                if self.draw_enabled {
                    cmds.draw(0..self.vertex_count);
                }
                self.frames += 1;
                AppControl::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_engine::render::{FrameCmd, TRIANGLE_VERTEX_COUNT};

    /// Window-side signals the event loop would deliver.
    enum Signal {
        Redraw,
        Close,
    }

    /// Feeds `signals` the way the runtime does: redraws are recorded until a
    /// close arrives. Returns the recorded frames.
    fn simulate(
        driver: &mut FrameDriver,
        signals: impl IntoIterator<Item = Signal>,
    ) -> Vec<CommandList> {
        let mut frames = Vec::new();
        for signal in signals {
            match signal {
                Signal::Redraw => {
                    let mut cmds = CommandList::new();
                    if driver.record_frame(&mut cmds) == AppControl::Exit {
                        break;
                    }
                    frames.push(cmds);
                }
                Signal::Close => {
                    driver.close();
                    break;
                }
            }
        }
        frames
    }

    fn running(program_ready: bool) -> FrameDriver {
        let mut d = FrameDriver::new(Color::BLACK, TRIANGLE_VERTEX_COUNT);
        d.start(program_ready);
        d
    }

    #[test]
    fn starts_uninitialized() {
        let d = FrameDriver::new(Color::BLACK, 3);
        assert_eq!(d.phase(), Phase::Uninitialized);
    }

    #[test]
    fn every_frame_is_one_clear_and_one_triangle() {
        let mut d = running(true);
        let signals = [Signal::Redraw, Signal::Redraw, Signal::Redraw, Signal::Close];
        let frames = simulate(&mut d, signals);

        assert_eq!(d.phase(), Phase::Terminated);
        assert_eq!(frames.len(), 3);
        for cmds in &frames {
            assert_eq!(
                cmds.commands(),
                &[FrameCmd::Clear(Color::BLACK), FrameCmd::Draw { vertices: 0..3 }]
            );
        }
        assert_eq!(d.frames(), 3);
    }

    #[test]
    fn immediate_close_records_nothing() {
        let mut d = running(true);
        let frames = simulate(&mut d, [Signal::Close]);
        assert!(frames.is_empty());
        assert_eq!(d.phase(), Phase::Terminated);
    }

    #[test]
    fn without_program_frames_only_clear() {
        let mut d = running(false);
        let frames = simulate(&mut d, [Signal::Redraw, Signal::Close]);
        assert_eq!(frames[0].commands(), &[FrameCmd::Clear(Color::BLACK)]);
    }

    #[test]
    fn nothing_is_recorded_before_start() {
        let mut d = FrameDriver::new(Color::BLACK, 3);
        let mut cmds = CommandList::new();
        assert_eq!(d.record_frame(&mut cmds), AppControl::Continue);
        assert!(cmds.is_empty());
        assert_eq!(d.frames(), 0);
    }

    #[test]
    fn terminated_driver_requests_exit() {
        let mut d = running(true);
        d.close();
        let mut cmds = CommandList::new();
        cmds.draw(0..3);
        assert_eq!(d.record_frame(&mut cmds), AppControl::Exit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn second_start_is_ignored() {
        let mut d = running(false);
        d.start(true);
        let mut cmds = CommandList::new();
        d.record_frame(&mut cmds);
        assert_eq!(cmds.draws().count(), 0);
    }
}
