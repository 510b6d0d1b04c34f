pub mod dictionary;
pub mod grouping;
pub mod primitives;
pub mod roles;
pub mod scale;
pub mod snap;
pub mod types;

pub use dictionary::Dictionary;
pub use grouping::{
    DataGrouper, GroupedData, LineGroup, MeasureReplication, Panel, replicate_by_measure,
};
pub use roles::{
    ALL_CATEGORY, CategoryColumn, CategoryValueKind, DataTable, MEASURE_CATEGORY, MeasureColumn,
    MeasureInfo, ResolvedRoles, TooltipColumn, XColumn, resolve_roles,
};
pub use scale::AxisScale;
pub use snap::{nearest_sample, sorted_distinct};
pub use types::{AxisSide, CellValue, Row, TooltipValue, Viewport};
