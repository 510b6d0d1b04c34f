use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_generation: Option<u64>,
    pub last_panel_count: usize,
    pub last_series_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_generation = Some(frame.generation);
        self.last_panel_count = frame.panels.len();
        self.last_series_count = frame.series_count();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
