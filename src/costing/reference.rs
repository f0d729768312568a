//! Ingredient references
//!
//! The leaf of every cost calculation: an ingredient as a recipe or dish uses it,
//! paired with the delivery price selected for it.

use rust_decimal::Decimal;

use crate::{
    catalog::{ComponentRef, DeliveryPrice, IngredientKey},
    costing::{Cost, CostError, UnavailableReason},
    units::{Measure, Unit},
};

/// An ingredient as seen by costing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientReference<'c> {
    /// The referenced ingredient
    pub ingredient: IngredientKey,

    /// Unit the referencing recipe or dish consumes the ingredient in
    pub unit: Unit,

    /// Selected delivery price, if any
    pub source_price: Option<&'c DeliveryPrice>,

    /// Kilograms per piece, if known
    pub piece_weight: Option<Decimal>,
}

impl IngredientReference<'_> {
    /// Cost of one `unit` of the ingredient.
    ///
    /// - Compatible units: `total_price / total_amount`.
    /// - Used by weight, priced per piece: `total_price / piece_weight`.
    ///
    /// The cost is unavailable when no price is selected, the piece weight needed
    /// for conversion is missing, the units cannot be converted, or a divisor is zero.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::Overflow`] if the quotient leaves the decimal range.
    pub fn unit_cost(&self) -> Result<Cost, CostError> {
        let (price, divisor) = match self.division() {
            Ok(division) => division,
            Err(reason) => return Ok(self.unavailable(reason)),
        };

        price
            .total_price
            .checked_div(divisor)
            .map(Cost::Priced)
            .ok_or(CostError::Overflow)
    }

    /// The selected price and the non-zero amount its total is divided by.
    fn division(&self) -> Result<(&DeliveryPrice, Decimal), UnavailableReason> {
        let price = self
            .source_price
            .ok_or(UnavailableReason::NoPriceSelected)?;

        let divisor = if price.unit.is_compatible_with(self.unit) {
            price.total_amount
        } else {
            match (self.unit.measure(), price.unit.measure()) {
                (Measure::Mass, Measure::Count) => self
                    .piece_weight
                    .ok_or(UnavailableReason::MissingPieceWeight)?,
                _ => {
                    return Err(UnavailableReason::IncompatibleUnits {
                        requested: self.unit,
                        priced: price.unit,
                    });
                }
            }
        };

        if divisor.is_zero() {
            return Err(UnavailableReason::ZeroQuantity);
        }

        Ok((price, divisor))
    }

    fn unavailable(&self, reason: UnavailableReason) -> Cost {
        Cost::unavailable(ComponentRef::Ingredient(self.ingredient), reason)
    }
}
