//! Column axes and the sparse aggregate value map.
//!
//! The pivot cube has category rows and a column hierarchy of
//! currency -> bank/company group -> date, with trailing per-axis totals
//! and one reporting-currency grand total.

pub mod axes;
pub mod fact;
pub mod values;

#[cfg(test)]
mod values_props;

pub use axes::{build_axes, AxisColumn, AxisTree, CurrencyAxis, GroupAxis};
pub use fact::{facts_from_movements, GroupKey, PivotFact};
pub use values::{CellKey, ValueMap};
