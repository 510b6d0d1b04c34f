use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Style channel an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleKind {
    Color,
    LineStyle,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("colour"),
            Self::LineStyle => f.write_str("line style"),
        }
    }
}

/// One persisted assignment. Unique per `(name, category)` within its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleEntry {
    pub name: String,
    #[serde(alias = "type")]
    pub category: String,
    pub value: String,
}

/// Persisted config blob: `{"dataColours": [...], "lineStyles": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedStyles {
    #[serde(rename = "dataColours", default)]
    pub data_colours: Vec<StyleEntry>,
    #[serde(rename = "lineStyles", default)]
    pub line_styles: Vec<StyleEntry>,
}

impl PersistedStyles {
    pub fn from_json(blob: &str) -> ChartResult<Self> {
        serde_json::from_str(blob).map_err(|err| ChartError::Serialization(err.to_string()))
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|err| ChartError::Serialization(err.to_string()))
    }

    #[must_use]
    pub fn entries(&self, kind: StyleKind) -> &[StyleEntry] {
        match kind {
            StyleKind::Color => &self.data_colours,
            StyleKind::LineStyle => &self.line_styles,
        }
    }

    fn entries_mut(&mut self, kind: StyleKind) -> &mut Vec<StyleEntry> {
        match kind {
            StyleKind::Color => &mut self.data_colours,
            StyleKind::LineStyle => &mut self.line_styles,
        }
    }
}

/// Host-side sink for the persisted style config.
///
/// Writes are fire-and-forget: a failure is logged by the caller and the
/// in-memory state stays authoritative.
pub trait ConfigPersistence {
    fn persist(&mut self, config_json: &str) -> ChartResult<()>;
}

/// Persistence sink that keeps every write in memory.
///
/// Clones share the same write log, so a caller can keep a handle after
/// moving one into the engine.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistence {
    writes: Rc<RefCell<Vec<String>>>,
}

impl InMemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl ConfigPersistence for InMemoryPersistence {
    fn persist(&mut self, config_json: &str) -> ChartResult<()> {
        self.writes.borrow_mut().push(config_json.to_owned());
        Ok(())
    }
}

/// Persisted name→style mapping with deterministic pool allocation.
pub struct StyleAssignmentStore {
    config: PersistedStyles,
    colour_pool: Vec<String>,
    line_style_pool: Vec<String>,
    rng: StdRng,
    persistence: Box<dyn ConfigPersistence>,
}

impl fmt::Debug for StyleAssignmentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleAssignmentStore")
            .field("config", &self.config)
            .field("colour_pool", &self.colour_pool)
            .field("line_style_pool", &self.line_style_pool)
            .finish_non_exhaustive()
    }
}

impl StyleAssignmentStore {
    pub fn new(
        colour_pool: Vec<String>,
        line_style_pool: Vec<String>,
        persistence: Box<dyn ConfigPersistence>,
        rng_seed: Option<u64>,
    ) -> ChartResult<Self> {
        if colour_pool.is_empty() || line_style_pool.is_empty() {
            return Err(ChartError::InvalidData(
                "style pools must not be empty".to_owned(),
            ));
        }
        for colour in &colour_pool {
            Color::from_hex(colour)?;
        }
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config: PersistedStyles::default(),
            colour_pool,
            line_style_pool,
            rng,
            persistence,
        })
    }

    /// Replaces the in-memory config from the host blob.
    ///
    /// An absent (empty) blob starts an empty config and persists it. A
    /// malformed blob starts an empty config without writing back. Colour
    /// entries that are not `#RRGGBB` are dropped so they get reallocated.
    pub fn load(&mut self, blob: &str) {
        if blob.trim().is_empty() {
            self.config = PersistedStyles::default();
            self.persist();
            return;
        }
        match PersistedStyles::from_json(blob) {
            Ok(mut config) => {
                config.data_colours.retain(|entry| {
                    let usable = Color::from_hex(&entry.value).is_ok();
                    if !usable {
                        warn!(
                            name = %entry.name,
                            category = %entry.category,
                            value = %entry.value,
                            "dropping persisted colour that is not #RRGGBB"
                        );
                    }
                    usable
                });
                debug!(
                    colours = config.data_colours.len(),
                    line_styles = config.line_styles.len(),
                    "loaded style config"
                );
                self.config = config;
            }
            Err(err) => {
                warn!(error = %err, "discarding malformed style config");
                self.config = PersistedStyles::default();
            }
        }
    }

    #[must_use]
    pub fn config(&self) -> &PersistedStyles {
        &self.config
    }

    #[must_use]
    pub fn pool(&self, kind: StyleKind) -> &[String] {
        match kind {
            StyleKind::Color => &self.colour_pool,
            StyleKind::LineStyle => &self.line_style_pool,
        }
    }

    #[must_use]
    pub fn entries(&self, kind: StyleKind) -> &[StyleEntry] {
        self.config.entries(kind)
    }

    /// Persisted value for `(name, category)` without allocating one.
    #[must_use]
    pub fn assigned(&self, kind: StyleKind, name: &str, category: &str) -> Option<&str> {
        self.config
            .entries(kind)
            .iter()
            .find(|entry| entry.name == name && entry.category == category)
            .map(|entry| entry.value.as_str())
    }

    /// Returns the style for `(name, category)`, allocating and persisting
    /// one on first sight.
    ///
    /// New values take the first pool member not yet used in `category`, or
    /// a random pool member once every member is in use.
    pub fn lookup(&mut self, kind: StyleKind, name: &str, category: &str) -> String {
        if let Some(value) = self.assigned(kind, name, category) {
            return value.to_owned();
        }

        let value = self.allocate(kind, category);
        debug!(%kind, name, category, value = %value, "assigned new style");
        self.config.entries_mut(kind).push(StyleEntry {
            name: name.to_owned(),
            category: category.to_owned(),
            value: value.clone(),
        });
        self.persist();
        value
    }

    fn allocate(&mut self, kind: StyleKind, category: &str) -> String {
        let used: Vec<&str> = self
            .config
            .entries(kind)
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| entry.value.as_str())
            .collect();
        let pool = match kind {
            StyleKind::Color => &self.colour_pool,
            StyleKind::LineStyle => &self.line_style_pool,
        };
        if let Some(free) = pool.iter().find(|value| !used.contains(&value.as_str())) {
            return free.clone();
        }
        pool.choose(&mut self.rng).cloned().unwrap_or_default()
    }

    /// Advances the entry to the next pool member, wrapping around.
    ///
    /// A value that is no longer in the pool restarts at the first member.
    pub fn increment(
        &mut self,
        kind: StyleKind,
        name: &str,
        category: &str,
    ) -> ChartResult<String> {
        let pool = match kind {
            StyleKind::Color => &self.colour_pool,
            StyleKind::LineStyle => &self.line_style_pool,
        };
        let entries = match kind {
            StyleKind::Color => &mut self.config.data_colours,
            StyleKind::LineStyle => &mut self.config.line_styles,
        };
        let Some(entry) = entries
            .iter_mut()
            .find(|entry| entry.name == name && entry.category == category)
        else {
            return Err(ChartError::UnknownStyleEntry {
                name: name.to_owned(),
                category: category.to_owned(),
            });
        };

        let next = match pool.iter().position(|value| *value == entry.value) {
            Some(idx) => (idx + 1) % pool.len(),
            None => 0,
        };
        entry.value = pool[next].clone();
        let value = entry.value.clone();
        debug!(%kind, name, category, value = %value, "incremented style");
        self.persist();
        Ok(value)
    }

    /// Drops every entry of `kind`.
    pub fn reset(&mut self, kind: StyleKind) {
        let entries = self.config.entries_mut(kind);
        let cleared = entries.len();
        entries.clear();
        debug!(%kind, cleared, "reset styles");
        self.persist();
    }

    fn persist(&mut self) {
        let json = match self.config.to_json() {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize style config");
                return;
            }
        };
        if let Err(err) = self.persistence.persist(&json) {
            warn!(error = %err, "failed to persist style config");
        }
    }
}
