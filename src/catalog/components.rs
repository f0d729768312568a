//! Components
//!
//! Recipes and dishes are composed from ingredients and other recipes. A component
//! pairs one of those references with the amount consumed, in the unit of the
//! referenced ingredient or recipe.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::catalog::{ingredients::IngredientKey, recipes::RecipeKey};

/// Ordered list of components belonging to a recipe or dish.
pub type Components = SmallVec<[Component; 8]>;

/// What a component refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRef {
    /// A purchased ingredient (leaf cost node)
    Ingredient(IngredientKey),

    /// Another recipe (composite cost node)
    Recipe(RecipeKey),
}

/// A reference to an ingredient or recipe together with the amount consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    /// The referenced ingredient or recipe
    pub item: ComponentRef,

    /// Amount consumed, in the referenced item's unit
    pub amount: Decimal,
}

impl Component {
    /// Creates an ingredient component.
    pub fn ingredient(key: IngredientKey, amount: Decimal) -> Self {
        Self {
            item: ComponentRef::Ingredient(key),
            amount,
        }
    }

    /// Creates a recipe component.
    pub fn recipe(key: RecipeKey, amount: Decimal) -> Self {
        Self {
            item: ComponentRef::Recipe(key),
            amount,
        }
    }

    /// Returns the referenced recipe, if this component is a recipe.
    pub fn recipe_key(&self) -> Option<RecipeKey> {
        match self.item {
            ComponentRef::Recipe(key) => Some(key),
            ComponentRef::Ingredient(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn recipe_key_only_for_recipe_components() {
        let recipe = Component::recipe(RecipeKey::default(), Decimal::ONE);
        let ingredient = Component::ingredient(IngredientKey::default(), Decimal::ONE);

        assert_eq!(recipe.recipe_key(), Some(RecipeKey::default()));
        assert_eq!(ingredient.recipe_key(), None);
    }
}
