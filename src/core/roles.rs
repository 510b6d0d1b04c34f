use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::types::{AxisSide, CellValue, Row, TooltipValue};
use crate::error::{ChartError, ChartResult};

/// Category name used when no category column backs the line dimension.
pub const ALL_CATEGORY: &str = "All";

/// Style category shared by every measure entry.
pub const MEASURE_CATEGORY: &str = "MODEL_MEASURE";

/// The x column as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XColumn {
    Numeric(Vec<f64>),
    Dates(Vec<DateTime<Utc>>),
}

impl XColumn {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Dates(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Dates(_))
    }

    fn value_at(&self, index: usize) -> f64 {
        match self {
            Self::Numeric(values) => values[index],
            Self::Dates(values) => datetime_to_unix_seconds(values[index]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub name: String,
    pub values: Vec<Option<CellValue>>,
}

impl CategoryColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<CellValue>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builds a text column where every cell is present.
    #[must_use]
    pub fn text<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            values
                .into_iter()
                .map(|value| Some(CellValue::Text(value.into())))
                .collect(),
        )
    }

    fn key_at(&self, index: usize) -> String {
        self.values
            .get(index)
            .and_then(Option::as_ref)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    fn distinct_count(&self) -> usize {
        let mut seen = indexmap::IndexSet::new();
        for index in 0..self.values.len() {
            seen.insert(self.key_at(index));
        }
        seen.len()
    }

    fn value_kind(&self) -> CategoryValueKind {
        match self.values.iter().flatten().next() {
            Some(CellValue::Number(_)) => CategoryValueKind::Number,
            _ => CategoryValueKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureColumn {
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
    pub values: Vec<Option<f64>>,
}

impl MeasureColumn {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            format: None,
            values,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Extra column whose value is listed in the tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TooltipColumn {
    Category(CategoryColumn),
    Measure(MeasureColumn),
}

impl TooltipColumn {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Category(column) => &column.name,
            Self::Measure(column) => &column.name,
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Category(column) => column.values.len(),
            Self::Measure(column) => column.values.len(),
        }
    }

    fn is_measure(&self) -> bool {
        matches!(self, Self::Measure(_))
    }

    fn value_at(&self, index: usize) -> TooltipValue {
        match self {
            Self::Category(column) => column
                .values
                .get(index)
                .cloned()
                .flatten()
                .unwrap_or_else(|| CellValue::Text(String::new())),
            Self::Measure(column) => column
                .values
                .get(index)
                .copied()
                .flatten()
                .map_or_else(|| CellValue::Text(String::new()), CellValue::Number),
        }
    }
}

/// Column table handed over by the host on every update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub x_name: String,
    /// Declared display format of the x column, if any.
    #[serde(default)]
    pub x_format: Option<String>,
    #[serde(default)]
    pub x: Option<XColumn>,
    #[serde(default)]
    pub line_by: Option<CategoryColumn>,
    #[serde(default)]
    pub visual_group_by: Option<CategoryColumn>,
    #[serde(default)]
    pub trellis_by: Option<CategoryColumn>,
    #[serde(default)]
    pub left_measures: Vec<MeasureColumn>,
    #[serde(default)]
    pub right_measures: Vec<MeasureColumn>,
    #[serde(default)]
    pub tooltips: Vec<TooltipColumn>,
}

impl DataTable {
    #[must_use]
    pub fn with_numeric_x(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            x_name: name.into(),
            x: Some(XColumn::Numeric(values)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_date_x(name: impl Into<String>, values: Vec<DateTime<Utc>>) -> Self {
        Self {
            x_name: name.into(),
            x: Some(XColumn::Dates(values)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.x.as_ref().map_or(0, XColumn::len)
    }

    #[must_use]
    pub fn measures(&self, side: AxisSide) -> &[MeasureColumn] {
        match side {
            AxisSide::Left => &self.left_measures,
            AxisSide::Right => &self.right_measures,
        }
    }

    /// Readiness check: x values, at least one measure and equal column lengths.
    pub fn validate(&self) -> ChartResult<()> {
        let Some(x) = self.x.as_ref() else {
            return Err(ChartError::NotReady("x column is missing".to_owned()));
        };
        if x.is_empty() {
            return Err(ChartError::NotReady("x column has no values".to_owned()));
        }
        if self.left_measures.is_empty() && self.right_measures.is_empty() {
            return Err(ChartError::NotReady("no measure columns".to_owned()));
        }
        if let XColumn::Numeric(values) = x {
            if values.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(
                    "x values must be finite".to_owned(),
                ));
            }
        }

        let mut measure_names = IndexSet::new();
        for column in self.left_measures.iter().chain(&self.right_measures) {
            if !measure_names.insert(column.name.as_str()) {
                return Err(ChartError::InvalidData(format!(
                    "measure `{}` is declared twice",
                    column.name
                )));
            }
        }

        let expected = x.len();
        let categories = [&self.line_by, &self.visual_group_by, &self.trellis_by];
        let category_lengths = categories
            .into_iter()
            .flatten()
            .map(|column| (column.name.as_str(), column.values.len()));
        let measure_lengths = self
            .left_measures
            .iter()
            .chain(&self.right_measures)
            .map(|column| (column.name.as_str(), column.values.len()));
        let tooltip_lengths = self
            .tooltips
            .iter()
            .map(|column| (column.name(), column.len()));

        for (name, len) in category_lengths.chain(measure_lengths).chain(tooltip_lengths) {
            if len != expected {
                return Err(ChartError::NotReady(format!(
                    "column `{name}` has {len} values, expected {expected}"
                )));
            }
        }
        Ok(())
    }
}

/// Runtime type of the line-by column, used to type host filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryValueKind {
    Text,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureInfo {
    pub name: String,
    pub format: Option<String>,
    pub side: AxisSide,
    /// Position within its side.
    pub index: usize,
}

impl MeasureInfo {
    #[must_use]
    pub fn is_percent(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|format| format.contains('%'))
    }
}

/// Rows plus the naming metadata derived while resolving column roles.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoles {
    pub rows: Vec<Row>,
    pub table_name: Option<String>,
    pub x_name: String,
    pub x_format: Option<String>,
    pub x_is_date: bool,
    pub line_category: String,
    pub visual_group_category: String,
    pub trellis_category: Option<String>,
    pub line_value_kind: CategoryValueKind,
    pub uses_visual_group_for_line: bool,
    pub left_measures: Vec<MeasureInfo>,
    pub right_measures: Vec<MeasureInfo>,
    pub tooltip_fields: Vec<String>,
}

impl ResolvedRoles {
    #[must_use]
    pub fn measures(&self, side: AxisSide) -> &[MeasureInfo] {
        match side {
            AxisSide::Left => &self.left_measures,
            AxisSide::Right => &self.right_measures,
        }
    }

    /// All measures, left first.
    pub fn all_measures(&self) -> impl Iterator<Item = &MeasureInfo> {
        self.left_measures.iter().chain(&self.right_measures)
    }

    #[must_use]
    pub fn measure_count(&self) -> usize {
        self.left_measures.len() + self.right_measures.len()
    }

    #[must_use]
    pub fn has_trellis_column(&self) -> bool {
        self.trellis_category.is_some()
    }
}

/// Turns a validated table into rows, resolving dimension aliasing.
pub fn resolve_roles(table: &DataTable) -> ChartResult<ResolvedRoles> {
    table.validate()?;
    let Some(x) = table.x.as_ref() else {
        return Err(ChartError::NotReady("x column is missing".to_owned()));
    };

    let uses_visual_group_for_line = match (&table.line_by, &table.visual_group_by) {
        (Some(line), Some(group)) => group.distinct_count() > line.distinct_count(),
        _ => false,
    };

    // Column that backs the line dimension, with its visual-group partner.
    let (line_column, group_column) = match (&table.line_by, &table.visual_group_by) {
        (Some(_), Some(group)) if uses_visual_group_for_line => (Some(group), Some(group)),
        (Some(line), Some(group)) => (Some(line), Some(group)),
        (Some(line), None) => (Some(line), Some(line)),
        (None, Some(group)) => (Some(group), Some(group)),
        (None, None) => match &table.trellis_by {
            Some(trellis) => (Some(trellis), Some(trellis)),
            None => (None, None),
        },
    };

    let line_category = line_column.map_or_else(|| ALL_CATEGORY.to_owned(), |c| c.name.clone());
    let visual_group_category = match (&table.visual_group_by, uses_visual_group_for_line) {
        (Some(group), false) => group.name.clone(),
        _ => line_category.clone(),
    };
    let line_value_kind = line_column.map_or(CategoryValueKind::Text, CategoryColumn::value_kind);

    let mut tooltip_columns: Vec<&TooltipColumn> = Vec::new();
    for column in &table.tooltips {
        let duplicate = tooltip_columns
            .iter()
            .any(|seen| seen.name() == column.name() && seen.is_measure() == column.is_measure());
        if !duplicate {
            tooltip_columns.push(column);
        }
    }

    let rows = (0..x.len())
        .map(|index| Row {
            x_value: x.value_at(index),
            y_values_left: table
                .left_measures
                .iter()
                .map(|measure| measure.values[index])
                .collect(),
            y_values_right: table
                .right_measures
                .iter()
                .map(|measure| measure.values[index])
                .collect(),
            line_by: line_column.map(|c| c.key_at(index)).unwrap_or_default(),
            visual_group_by: group_column.map(|c| c.key_at(index)).unwrap_or_default(),
            trellis_by: table
                .trellis_by
                .as_ref()
                .map(|c| c.key_at(index))
                .unwrap_or_default(),
            tooltip_data: tooltip_columns
                .iter()
                .map(|column| column.value_at(index))
                .collect(),
        })
        .collect();

    Ok(ResolvedRoles {
        rows,
        table_name: table.table_name.clone(),
        x_name: table.x_name.clone(),
        x_format: table.x_format.clone(),
        x_is_date: x.is_date(),
        line_category,
        visual_group_category,
        trellis_category: table.trellis_by.as_ref().map(|c| c.name.clone()),
        line_value_kind,
        uses_visual_group_for_line,
        left_measures: measure_infos(&table.left_measures, AxisSide::Left),
        right_measures: measure_infos(&table.right_measures, AxisSide::Right),
        tooltip_fields: tooltip_columns
            .iter()
            .map(|column| column.name().to_owned())
            .collect(),
    })
}

fn measure_infos(columns: &[MeasureColumn], side: AxisSide) -> Vec<MeasureInfo> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| MeasureInfo {
            name: column.name.clone(),
            format: column.format.clone(),
            side,
            index,
        })
        .collect()
}
