use serde::{Deserialize, Serialize};

use crate::core::roles::MEASURE_CATEGORY;

use super::config::StyleDriver;
use super::style_store::{StyleAssignmentStore, StyleKind};

/// Resolved style of one drawn line (series × measure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub colour: String,
    pub line_style: String,
}

/// Which dimension keys each style channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBinding {
    driver: StyleDriver,
    visual_group_category: String,
}

impl StyleBinding {
    #[must_use]
    pub fn new(driver: StyleDriver, visual_group_category: impl Into<String>) -> Self {
        Self {
            driver,
            visual_group_category: visual_group_category.into(),
        }
    }

    #[must_use]
    pub fn driver(&self) -> StyleDriver {
        self.driver
    }

    /// Channel whose entries are keyed by visual group.
    #[must_use]
    pub fn visual_group_kind(&self) -> StyleKind {
        match self.driver {
            StyleDriver::VisualGroup => StyleKind::Color,
            StyleDriver::Measure => StyleKind::LineStyle,
        }
    }

    /// Channel whose entries are keyed by measure.
    #[must_use]
    pub fn measure_kind(&self) -> StyleKind {
        match self.driver {
            StyleDriver::VisualGroup => StyleKind::LineStyle,
            StyleDriver::Measure => StyleKind::Color,
        }
    }

    #[must_use]
    pub fn visual_group_category(&self) -> &str {
        &self.visual_group_category
    }

    /// Style for `visual_group` drawn with `measure`, allocating on first sight.
    pub fn resolve(
        &self,
        store: &mut StyleAssignmentStore,
        visual_group: &str,
        measure: &str,
    ) -> SeriesStyle {
        let group_value = store.lookup(
            self.visual_group_kind(),
            visual_group,
            &self.visual_group_category,
        );
        let measure_value = store.lookup(self.measure_kind(), measure, MEASURE_CATEGORY);
        match self.driver {
            StyleDriver::VisualGroup => SeriesStyle {
                colour: group_value,
                line_style: measure_value,
            },
            StyleDriver::Measure => SeriesStyle {
                colour: measure_value,
                line_style: group_value,
            },
        }
    }

    /// `(name, category)` key of the entry a legend item controls.
    #[must_use]
    pub fn entry_key<'a>(&'a self, kind: StyleKind, name: &'a str) -> (&'a str, &'a str) {
        if kind == self.measure_kind() {
            (name, MEASURE_CATEGORY)
        } else {
            (name, self.visual_group_category.as_str())
        }
    }
}
