//! Cost breakdowns

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    catalog::ComponentRef,
    costing::{Cost, CostError},
};

/// Cost of one component of a recipe or dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostLine {
    /// The ingredient or recipe consumed
    pub item: ComponentRef,

    /// Amount consumed
    pub amount: Decimal,

    /// Cost of one unit of the item
    pub unit_cost: Cost,

    /// `unit_cost * amount`
    pub line_cost: Cost,
}

/// Per-component costs of a recipe or dish, with their sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostBreakdown {
    /// One line per component, in component order
    pub lines: SmallVec<[CostLine; 8]>,

    /// Sum of all line costs
    pub total: Cost,
}

impl CostBreakdown {
    pub(crate) fn from_lines(lines: SmallVec<[CostLine; 8]>) -> Result<Self, CostError> {
        let total = lines
            .iter()
            .try_fold(Cost::ZERO, |total, line| total.checked_add(line.line_cost))
            .ok_or(CostError::Overflow)?;

        Ok(Self { lines, total })
    }

    /// Lines whose cost could not be determined.
    pub fn unavailable_lines(&self) -> impl Iterator<Item = &CostLine> {
        self.lines.iter().filter(|line| !line.line_cost.is_available())
    }
}
