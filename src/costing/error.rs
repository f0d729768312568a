//! Costing errors

use thiserror::Error;

use crate::catalog::{DishKey, IngredientKey, RecipeKey};

/// Structural failures that stop a cost calculation.
///
/// A missing price is not one of them: that is reported as
/// [`Cost::Unavailable`](super::Cost::Unavailable).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CostError {
    /// A recipe contains itself, directly or through other recipes.
    #[error("recipe composition is cyclic: {path:?}")]
    CyclicComposition {
        /// Recipes along the cycle, starting and ending with the same recipe
        path: Vec<RecipeKey>,
    },

    /// A component references an ingredient missing from the catalog.
    #[error("ingredient {0:?} is not in the catalog")]
    UnknownIngredient(IngredientKey),

    /// A component references a recipe missing from the catalog.
    #[error("recipe {0:?} is not in the catalog")]
    UnknownRecipe(RecipeKey),

    /// The dish is missing from the catalog.
    #[error("dish {0:?} is not in the catalog")]
    UnknownDish(DishKey),

    /// A cost left the range of the decimal type.
    #[error("cost is outside the representable decimal range")]
    Overflow,
}
