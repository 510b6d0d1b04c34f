use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::engine::{TrellisEngine, UpdateInput, UpdateOutcome};
use super::render_context::RenderContext;

impl<R: Renderer> TrellisEngine<R> {
    /// Handles one host update.
    ///
    /// The update that follows our own filter request only echoes it: the
    /// context and selection are kept and the frame is redrawn. Any other
    /// update rebuilds everything into a new generation.
    pub fn update(&mut self, input: UpdateInput) -> ChartResult<UpdateOutcome> {
        if self.awaiting_filter_echo {
            self.awaiting_filter_echo = false;
            if let Some(generation) = self.generation() {
                debug!(generation, "skipping filter echo update");
                self.render()?;
                return Ok(UpdateOutcome::FilterEcho { generation });
            }
        }

        self.store.load(&input.settings.chart_config);
        self.selection.clear();
        self.interaction.reset();

        let generation = self.next_generation;
        self.next_generation += 1;
        let context = match RenderContext::build(
            generation,
            &input.table,
            &input.settings,
            input.viewport,
        ) {
            Ok(context) => context,
            Err(ChartError::NotReady(reason)) => {
                warn!(reason = %reason, "update not ready");
                self.context = None;
                self.selection.set_filter_target(None);
                return Ok(UpdateOutcome::NotReady { reason });
            }
            Err(err) => {
                self.context = None;
                self.selection.set_filter_target(None);
                return Err(err);
            }
        };

        self.selection
            .set_filter_target(context.filter_target.clone());
        debug!(
            generation,
            panels = context.panels.len(),
            "swapping in render context"
        );
        self.context = Some(context);
        self.render()?;
        Ok(UpdateOutcome::Rendered { generation })
    }
}
