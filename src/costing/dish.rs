//! Dish costing

use decimal_percentage::Percentage;
use rust_decimal::Decimal;

use crate::{catalog::DishKey, costing::Cost};

/// Costed dish, with the inputs a margin check needs.
///
/// The comparison against the target price is exposed, not enforced: deciding what
/// an over-cost dish means is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DishCosting {
    /// The costed dish
    pub dish: DishKey,

    /// Sum of the dish's component costs
    pub ingredient_cost: Cost,

    /// Markup factor of the dish
    pub multiplier: Decimal,

    /// `ingredient_cost * multiplier`
    pub total: Cost,

    /// Price the total should not exceed
    pub target_price: Option<Decimal>,

    /// Price the dish is sold at
    pub menu_price: Option<Decimal>,
}

impl DishCosting {
    /// Whether the marked-up total is above the target price.
    ///
    /// `None` when the total is unavailable or the dish has no target price.
    pub fn exceeds_target(&self) -> Option<bool> {
        Some(self.total.amount()? > self.target_price?)
    }

    /// Ingredient cost as a fraction of the menu price.
    ///
    /// `None` when the cost is unavailable or there is no non-zero menu price.
    pub fn food_cost_percentage(&self) -> Option<Percentage> {
        let cost = self.ingredient_cost.amount()?;

        cost.checked_div(self.menu_price?).map(Percentage::from)
    }

    /// Menu price less ingredient cost.
    ///
    /// `None` when the cost is unavailable, there is no menu price, or the
    /// difference leaves the decimal range.
    pub fn gross_margin(&self) -> Option<Decimal> {
        self.menu_price?.checked_sub(self.ingredient_cost.amount()?)
    }
}
