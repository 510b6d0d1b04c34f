use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::roles::CategoryValueKind;
use crate::core::types::CellValue;
use crate::error::ChartResult;

/// Visual weight of a series derived from the selection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    Normal,
    Highlighted,
    Dimmed,
}

impl Emphasis {
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Normal | Self::Highlighted => 1.0,
            Self::Dimmed => 0.35,
        }
    }

    #[must_use]
    pub fn stroke_width(self) -> f64 {
        match self {
            Self::Highlighted => 2.5,
            Self::Normal | Self::Dimmed => 1.5,
        }
    }
}

/// Filter instruction for the host, targeting the line-by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterRequest {
    Apply {
        table: Option<String>,
        column: String,
        values: Vec<CellValue>,
    },
    Clear {
        table: Option<String>,
        column: String,
    },
}

/// Host collaborator that applies cross-filters.
pub trait HostFilter {
    fn apply(&mut self, request: FilterRequest) -> ChartResult<()>;
}

/// Host filter that records every request. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHostFilter {
    requests: Rc<RefCell<Vec<FilterRequest>>>,
}

impl InMemoryHostFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<FilterRequest> {
        self.requests.borrow().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<FilterRequest> {
        self.requests.borrow().last().cloned()
    }
}

impl HostFilter for InMemoryHostFilter {
    fn apply(&mut self, request: FilterRequest) -> ChartResult<()> {
        self.requests.borrow_mut().push(request);
        Ok(())
    }
}

/// Column the cross-filter targets and the type its values carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTarget {
    pub table: Option<String>,
    pub column: String,
    pub value_kind: CategoryValueKind,
}

/// Result of one toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// `true` when the key is now selected.
    pub selected: bool,
    pub request: Option<FilterRequest>,
}

/// Tracks selected series keys for one rendering session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionCoordinator {
    selected: IndexSet<String>,
    target: Option<FilterTarget>,
}

impl SelectionCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables host filter requests against `target`.
    #[must_use]
    pub fn with_filter_target(target: FilterTarget) -> Self {
        Self {
            selected: IndexSet::new(),
            target: Some(target),
        }
    }

    pub fn set_filter_target(&mut self, target: Option<FilterTarget>) {
        self.target = target;
    }

    #[must_use]
    pub fn filter_target(&self) -> Option<&FilterTarget> {
        self.target.as_ref()
    }

    /// Adds `key` if absent, removes it otherwise.
    pub fn toggle(&mut self, key: &str) -> ToggleOutcome {
        let selected = if self.selected.shift_remove(key) {
            false
        } else {
            self.selected.insert(key.to_owned());
            true
        };
        debug!(key, selected, selection_len = self.selected.len(), "toggled selection");
        ToggleOutcome {
            selected,
            request: self.filter_request(),
        }
    }

    /// Filter request matching the current set, when cross-filtering is on.
    #[must_use]
    pub fn filter_request(&self) -> Option<FilterRequest> {
        let target = self.target.as_ref()?;
        if self.selected.is_empty() {
            return Some(FilterRequest::Clear {
                table: target.table.clone(),
                column: target.column.clone(),
            });
        }
        let values = self
            .selected
            .iter()
            .map(|key| typed_filter_value(key, target.value_kind))
            .collect();
        Some(FilterRequest::Apply {
            table: target.table.clone(),
            column: target.column.clone(),
            values,
        })
    }

    #[must_use]
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn selected_keys(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    #[must_use]
    pub fn emphasis(&self, key: &str) -> Emphasis {
        if self.selected.is_empty() {
            Emphasis::Normal
        } else if self.selected.contains(key) {
            Emphasis::Highlighted
        } else {
            Emphasis::Dimmed
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

fn typed_filter_value(key: &str, kind: CategoryValueKind) -> CellValue {
    match kind {
        CategoryValueKind::Number => key
            .parse::<f64>()
            .map_or_else(|_| CellValue::Text(key.to_owned()), CellValue::Number),
        CategoryValueKind::Text => CellValue::Text(key.to_owned()),
    }
}
