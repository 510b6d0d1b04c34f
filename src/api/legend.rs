use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::dictionary::Dictionary;
use crate::core::roles::{ALL_CATEGORY, MEASURE_CATEGORY};
use crate::core::types::Row;

use super::series_style::StyleBinding;
use super::style_store::{StyleAssignmentStore, StyleKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Style entry name: a visual group value or a measure name.
    pub key: String,
    pub category: String,
    /// Ordinal slot of `key` in the update's dictionary.
    pub slot: String,
    pub display: String,
    pub tooltip: String,
    pub style_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendModel {
    pub title: String,
    pub kind: StyleKind,
    pub entries: Vec<LegendEntry>,
}

/// Naming inputs shared by every series legend of one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendNaming<'a> {
    pub line_category: &'a str,
    pub visual_group_category: &'a str,
    pub trellis_category: Option<&'a str>,
    /// Whether line keys and visual groups come from distinct columns.
    pub distinct_line_column: bool,
}

/// Line-by category name, pluralized unless there is a single panel, it
/// already ends in `s`, or it is the catch-all category.
#[must_use]
pub fn series_legend_title(line_category: &str, panel_count: usize) -> String {
    if panel_count == 1 || line_category.ends_with('s') || line_category == ALL_CATEGORY {
        line_category.to_owned()
    } else {
        format!("{line_category}s")
    }
}

#[must_use]
pub fn measure_legend_title(measure_count: usize) -> &'static str {
    if measure_count > 1 { "Measures" } else { "Measure" }
}

/// Visual groups in first-seen row order, each with its distinct line keys.
#[must_use]
pub fn group_line_keys<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
) -> IndexMap<String, Vec<String>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for row in rows {
        let keys = grouped.entry(row.visual_group_by.clone()).or_default();
        if !keys.contains(&row.line_by) {
            keys.push(row.line_by.clone());
        }
    }
    grouped
}

/// Legend of visual groups, each displayed as its line keys joined by `" | "`.
///
/// Entries follow `order`, the update's visual-group dictionary, so panel
/// legends list their groups in the same relative order as the shared one.
///
/// # Panics
///
/// Panics when a row carries a visual group missing from `order`.
pub fn series_legend<'a>(
    rows: impl IntoIterator<Item = &'a Row>,
    order: &Dictionary,
    naming: LegendNaming<'_>,
    panel_count: usize,
    binding: &StyleBinding,
    store: &mut StyleAssignmentStore,
) -> LegendModel {
    let kind = binding.visual_group_kind();
    let plain_tooltips = !naming.distinct_line_column
        || Some(naming.visual_group_category) == naming.trellis_category;
    let mut groups: Vec<(String, Vec<String>)> = group_line_keys(rows).into_iter().collect();
    groups.sort_by_key(|(group, _)| order.index_of(group));
    let entries = groups
        .into_iter()
        .map(|(group, lines)| {
            let display = lines.join(" | ");
            let tooltip = if plain_tooltips {
                display.clone()
            } else {
                format!("{display} ({}: {group})", naming.visual_group_category)
            };
            let style_value = store.lookup(kind, &group, binding.visual_group_category());
            LegendEntry {
                slot: order.value(&group).to_owned(),
                key: group,
                category: binding.visual_group_category().to_owned(),
                display,
                tooltip,
                style_value,
            }
        })
        .collect();
    LegendModel {
        title: series_legend_title(naming.line_category, panel_count),
        kind,
        entries,
    }
}

/// Legend of measures, in declaration order.
///
/// # Panics
///
/// Panics when a measure is missing from `order`.
pub fn measure_legend<'a>(
    measures: impl IntoIterator<Item = &'a str>,
    order: &Dictionary,
    binding: &StyleBinding,
    store: &mut StyleAssignmentStore,
) -> LegendModel {
    let kind = binding.measure_kind();
    let entries: Vec<LegendEntry> = measures
        .into_iter()
        .map(|name| LegendEntry {
            key: name.to_owned(),
            category: MEASURE_CATEGORY.to_owned(),
            slot: order.value(name).to_owned(),
            display: name.to_owned(),
            tooltip: name.to_owned(),
            style_value: store.lookup(kind, name, MEASURE_CATEGORY),
        })
        .collect();
    LegendModel {
        title: measure_legend_title(entries.len()).to_owned(),
        kind,
        entries,
    }
}
