use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::snap::sorted_distinct;
use crate::core::types::{AxisSide, Row};

/// Rows of one series (line key) inside a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGroup {
    pub key: String,
    pub rows: Vec<Row>,
    x_index: IndexMap<OrderedFloat<f64>, usize>,
}

impl LineGroup {
    fn new(key: String) -> Self {
        Self {
            key,
            rows: Vec::new(),
            x_index: IndexMap::new(),
        }
    }

    fn push(&mut self, row: Row) {
        self.x_index
            .entry(OrderedFloat(row.x_value))
            .or_insert(self.rows.len());
        self.rows.push(row);
    }

    /// First row of this series at exactly `x`.
    #[must_use]
    pub fn row_at(&self, x: f64) -> Option<&Row> {
        self.x_index
            .get(&OrderedFloat(x))
            .and_then(|&idx| self.rows.get(idx))
    }

    /// Visual group the series belongs to. Every row of a line shares it.
    #[must_use]
    pub fn visual_group(&self) -> &str {
        self.rows
            .first()
            .map_or("", |row| row.visual_group_by.as_str())
    }

    /// `(x, value)` pairs of one measure, sorted by x, missing values skipped.
    #[must_use]
    pub fn measure_points(&self, side: AxisSide, measure: usize) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self
            .rows
            .iter()
            .filter_map(|row| {
                row.values(side)
                    .get(measure)
                    .copied()
                    .flatten()
                    .filter(|value| value.is_finite())
                    .map(|value| (row.x_value, value))
            })
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }
}

/// One trellis cell: its series in first-seen order plus the sorted X samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub key: String,
    pub lines: IndexMap<String, LineGroup>,
    distinct_x: Vec<f64>,
}

impl Panel {
    #[must_use]
    pub fn distinct_x(&self) -> &[f64] {
        &self.distinct_x
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.lines.values().flat_map(|line| line.rows.iter())
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.lines.values().map(|line| line.rows.len()).sum()
    }

    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        Some((*self.distinct_x.first()?, *self.distinct_x.last()?))
    }

    /// Largest value on `side`, optionally restricted to one measure index.
    #[must_use]
    pub fn max_value(&self, side: AxisSide, measure: Option<usize>) -> Option<f64> {
        self.rows()
            .filter_map(|row| row.max_value(side, measure))
            .reduce(f64::max)
    }
}

/// Result of grouping: panels in first-seen trellis order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedData {
    pub panels: Vec<Panel>,
}

impl GroupedData {
    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.panels.iter().flat_map(Panel::rows)
    }

    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        self.panels
            .iter()
            .filter_map(Panel::x_extent)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
    }

    #[must_use]
    pub fn max_value(&self, side: AxisSide, measure: Option<usize>) -> Option<f64> {
        self.panels
            .iter()
            .filter_map(|panel| panel.max_value(side, measure))
            .reduce(f64::max)
    }
}

/// Measure names used when panels are formed per measure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureReplication {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Partitions rows into panels (trellis key) and series (line key).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataGrouper {
    replication: Option<MeasureReplication>,
}

impl DataGrouper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Panels become one per measure. Only meaningful without a trellis column.
    #[must_use]
    pub fn by_measure(measures: MeasureReplication) -> Self {
        Self {
            replication: Some(measures),
        }
    }

    #[must_use]
    pub fn is_by_measure(&self) -> bool {
        self.replication.is_some()
    }

    #[must_use]
    pub fn group(&self, rows: Vec<Row>) -> GroupedData {
        let input_count = rows.len();
        let rows = match &self.replication {
            Some(measures) => replicate_by_measure(&rows, measures),
            None => rows,
        };

        let mut panels: IndexMap<String, IndexMap<String, LineGroup>> = IndexMap::new();
        for row in rows {
            let lines = panels.entry(row.trellis_by.clone()).or_default();
            lines
                .entry(row.line_by.clone())
                .or_insert_with(|| LineGroup::new(row.line_by.clone()))
                .push(row);
        }

        let panels: Vec<Panel> = panels
            .into_iter()
            .map(|(key, lines)| {
                let distinct_x = sorted_distinct(
                    lines
                        .values()
                        .flat_map(|line| line.rows.iter().map(|row| row.x_value)),
                );
                Panel {
                    key,
                    lines,
                    distinct_x,
                }
            })
            .collect();

        debug!(
            input_rows = input_count,
            panel_count = panels.len(),
            by_measure = self.is_by_measure(),
            "grouped rows"
        );
        GroupedData { panels }
    }
}

/// Replicates every row once per measure, left measures first.
///
/// Each replica is keyed to the measure's panel and carries only that
/// measure's value on its own side.
#[must_use]
pub fn replicate_by_measure(rows: &[Row], measures: &MeasureReplication) -> Vec<Row> {
    let sides = [
        (AxisSide::Left, &measures.left),
        (AxisSide::Right, &measures.right),
    ];
    let mut out = Vec::with_capacity(rows.len() * (measures.left.len() + measures.right.len()));
    for (side, names) in sides {
        for (idx, name) in names.iter().enumerate() {
            out.extend(rows.iter().map(|row| {
                let value = row.values(side).get(idx).copied().flatten();
                let (left, right) = match side {
                    AxisSide::Left => (vec![value], Vec::new()),
                    AxisSide::Right => (Vec::new(), vec![value]),
                };
                Row {
                    x_value: row.x_value,
                    y_values_left: left,
                    y_values_right: right,
                    line_by: row.line_by.clone(),
                    visual_group_by: row.visual_group_by.clone(),
                    trellis_by: name.clone(),
                    tooltip_data: row.tooltip_data.clone(),
                }
            }));
        }
    }
    out
}
