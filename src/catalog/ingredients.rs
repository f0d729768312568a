//! Ingredients

use rust_decimal::Decimal;
use slotmap::new_key_type;

use crate::{catalog::deliveries::DeliveryKey, units::Unit};

new_key_type! {
    /// Ingredient Key
    pub struct IngredientKey;
}

/// An ingredient as recipes and dishes consume it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,

    /// Unit recipes and dishes consume this ingredient in
    pub unit: Unit,

    /// Kilograms per piece, for piece-priced ingredients consumed by weight
    pub piece_weight: Option<Decimal>,

    pub(crate) selected_delivery: Option<DeliveryKey>,
}

impl Ingredient {
    /// Creates an ingredient with no selected delivery and no piece weight.
    pub fn new(name: impl Into<String>, unit: Unit) -> Self {
        Self {
            name: name.into(),
            unit,
            piece_weight: None,
            selected_delivery: None,
        }
    }

    /// Sets the weight of a single piece, in kilograms.
    #[must_use]
    pub fn with_piece_weight(mut self, piece_weight: Decimal) -> Self {
        self.piece_weight = Some(piece_weight);
        self
    }

    /// The delivery whose price is authoritative for costing.
    pub fn selected_delivery(&self) -> Option<DeliveryKey> {
        self.selected_delivery
    }
}
