//! Recipes

use rust_decimal::Decimal;
use slotmap::new_key_type;

use crate::{
    catalog::components::{Component, Components},
    units::Unit,
};

new_key_type! {
    /// Recipe Key
    pub struct RecipeKey;
}

/// A recipe producing `yield_amount` of `unit` from its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Recipe name
    pub name: String,

    /// Total quantity the recipe produces
    pub yield_amount: Decimal,

    /// Unit of the yield
    pub unit: Unit,

    pub(crate) components: Components,
}

impl Recipe {
    /// Creates a recipe with no components.
    pub fn new(name: impl Into<String>, yield_amount: Decimal, unit: Unit) -> Self {
        Self {
            name: name.into(),
            yield_amount,
            unit,
            components: Components::new(),
        }
    }

    /// Sets the components of the recipe.
    #[must_use]
    pub fn with_components(mut self, components: impl IntoIterator<Item = Component>) -> Self {
        self.components = components.into_iter().collect();
        self
    }

    /// Components in the order they were listed.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Recipes used directly as components of this recipe.
    pub fn sub_recipes(&self) -> impl Iterator<Item = RecipeKey> + '_ {
        self.components.iter().filter_map(Component::recipe_key)
    }
}
