use serde::{Deserialize, Serialize};

use crate::core::roles::DataTable;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::config::{TrellisEngineConfig, TrellisSettings};
use super::frame_builder::build_render_frame;
use super::render_context::RenderContext;
use super::selection::{HostFilter, SelectionCoordinator};
use super::style_store::{ConfigPersistence, StyleAssignmentStore};

/// Everything the host hands over on one update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateInput {
    pub table: DataTable,
    #[serde(default)]
    pub settings: TrellisSettings,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOutcome {
    /// A new context was built and rendered.
    Rendered { generation: u64 },
    /// The update only echoed our own filter request; the context was kept.
    FilterEcho { generation: u64 },
    /// Input failed the readiness check; nothing is rendered.
    NotReady { reason: String },
}

/// Main orchestration facade consumed by host applications.
///
/// `TrellisEngine` owns the current render context, the persisted style
/// store, the selection set and pointer state, and drives the renderer.
pub struct TrellisEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TrellisEngineConfig,
    pub(super) store: StyleAssignmentStore,
    pub(super) selection: SelectionCoordinator,
    pub(super) interaction: InteractionState,
    pub(super) host_filter: Option<Box<dyn HostFilter>>,
    pub(super) context: Option<RenderContext>,
    pub(super) next_generation: u64,
    pub(super) awaiting_filter_echo: bool,
}

impl<R: Renderer> TrellisEngine<R> {
    pub fn new(
        renderer: R,
        config: TrellisEngineConfig,
        persistence: Box<dyn ConfigPersistence>,
    ) -> ChartResult<Self> {
        let store = StyleAssignmentStore::new(
            config.colour_pool.clone(),
            config.line_style_pool.clone(),
            persistence,
            config.rng_seed,
        )?;
        Ok(Self {
            renderer,
            config,
            store,
            selection: SelectionCoordinator::new(),
            interaction: InteractionState::default(),
            host_filter: None,
            context: None,
            next_generation: 1,
            awaiting_filter_echo: false,
        })
    }

    /// Attaches the collaborator that receives cross-filter requests.
    #[must_use]
    pub fn with_host_filter(mut self, host_filter: Box<dyn HostFilter>) -> Self {
        self.host_filter = Some(host_filter);
        self
    }

    /// Draws the current context, including the active tooltip.
    pub fn render(&mut self) -> ChartResult<()> {
        let Some(context) = self.context.as_ref() else {
            return Err(ChartError::NotReady("no render context".to_owned()));
        };
        let tooltip = self.interaction.tooltip(context.generation);
        let highlight = self.interaction.highlighted_line(context.generation);
        let frame = build_render_frame(
            context,
            &mut self.store,
            &self.selection,
            tooltip,
            highlight,
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn context(&self) -> Option<&RenderContext> {
        self.context.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        self.context.as_ref().map(|context| context.generation)
    }

    #[must_use]
    pub fn config(&self) -> &TrellisEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn style_store(&self) -> &StyleAssignmentStore {
        &self.store
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionCoordinator {
        &self.selection
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn require_context(&self) -> ChartResult<&RenderContext> {
        self.context
            .as_ref()
            .ok_or_else(|| ChartError::NotReady("no render context".to_owned()))
    }
}
