//! Catalog errors

use thiserror::Error;

use crate::catalog::{
    deliveries::DeliveryKey, ingredients::IngredientKey, recipes::RecipeKey,
    suppliers::SupplierKey,
};

/// Errors that can occur when writing to a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A referenced ingredient does not exist.
    #[error("ingredient {0:?} is not in the catalog")]
    UnknownIngredient(IngredientKey),

    /// A referenced recipe does not exist.
    #[error("recipe {0:?} is not in the catalog")]
    UnknownRecipe(RecipeKey),

    /// A referenced supplier does not exist.
    #[error("supplier {0:?} is not in the catalog")]
    UnknownSupplier(SupplierKey),

    /// A referenced delivery does not exist.
    #[error("delivery {0:?} is not in the catalog")]
    UnknownDelivery(DeliveryKey),

    /// A delivery was selected for an ingredient it was not a delivery of.
    #[error("delivery {delivery:?} belongs to ingredient {owner:?}, not {ingredient:?}")]
    DeliveryIngredientMismatch {
        /// The delivery being selected
        delivery: DeliveryKey,

        /// The ingredient it was selected for
        ingredient: IngredientKey,

        /// The ingredient the delivery was actually for
        owner: IngredientKey,
    },

    /// The edit would make a recipe contain itself, directly or transitively.
    #[error("recipe composition would be cyclic: {path:?}")]
    CyclicComposition {
        /// Recipes along the cycle, starting and ending with the same recipe
        path: Vec<RecipeKey>,
    },

    /// A record with the same name already exists.
    #[error("duplicate {kind} name: {name}")]
    DuplicateName {
        /// Kind of record ("ingredient", "recipe"...)
        kind: &'static str,

        /// The duplicated name
        name: String,
    },
}
