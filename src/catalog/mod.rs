//! Catalog
//!
//! A read-mostly snapshot of suppliers, deliveries, ingredients, recipes and dishes.
//! Costing borrows the catalog immutably; every write validates the references it
//! introduces and refuses recipe compositions that would contain themselves.

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use tracing::{debug, warn};

use self::composition::CompositionGraph;

pub mod components;
pub mod deliveries;
pub mod dishes;
pub mod error;
pub mod ingredients;
pub mod recipes;
pub mod suppliers;

mod composition;

pub use components::{Component, ComponentRef, Components};
pub use deliveries::{Delivery, DeliveryKey, DeliveryPrice};
pub use dishes::{Dish, DishKey};
pub use error::CatalogError;
pub use ingredients::{Ingredient, IngredientKey};
pub use recipes::{Recipe, RecipeKey};
pub use suppliers::{Supplier, SupplierKey};

/// Catalog of everything that can be costed, priced in a single currency.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: &'static Currency,

    suppliers: SlotMap<SupplierKey, Supplier>,
    deliveries: SlotMap<DeliveryKey, Delivery>,
    ingredients: SlotMap<IngredientKey, Ingredient>,
    recipes: SlotMap<RecipeKey, Recipe>,
    dishes: SlotMap<DishKey, Dish>,

    supplier_names: NameIndex<SupplierKey>,
    ingredient_names: NameIndex<IngredientKey>,
    recipe_names: NameIndex<RecipeKey>,
    dish_names: NameIndex<DishKey>,
}

impl Catalog {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            suppliers: SlotMap::with_key(),
            deliveries: SlotMap::with_key(),
            ingredients: SlotMap::with_key(),
            recipes: SlotMap::with_key(),
            dishes: SlotMap::with_key(),
            supplier_names: NameIndex::new("supplier"),
            ingredient_names: NameIndex::new("ingredient"),
            recipe_names: NameIndex::new("recipe"),
            dish_names: NameIndex::new("dish"),
        }
    }

    /// Currency every price in the catalog is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Add a supplier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if a supplier with the same name exists.
    pub fn add_supplier(&mut self, supplier: Supplier) -> Result<SupplierKey, CatalogError> {
        self.supplier_names.ensure_free(&supplier.name)?;

        let name = supplier.name.clone();
        let key = self.suppliers.insert(supplier);

        self.supplier_names.insert(name, key);

        Ok(key)
    }

    /// Add an ingredient.
    ///
    /// New ingredients are unpriced until a delivery is selected with
    /// [`Catalog::select_delivery`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateName`] if an ingredient with the same name exists.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<IngredientKey, CatalogError> {
        self.ingredient_names.ensure_free(&ingredient.name)?;

        let name = ingredient.name.clone();
        let key = self.ingredients.insert(ingredient);

        self.ingredient_names.insert(name, key);

        Ok(key)
    }

    /// Record a delivery of an ingredient.
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient or supplier does not exist.
    pub fn add_delivery(&mut self, delivery: Delivery) -> Result<DeliveryKey, CatalogError> {
        if !self.ingredients.contains_key(delivery.ingredient) {
            return Err(CatalogError::UnknownIngredient(delivery.ingredient));
        }

        if let Some(supplier) = delivery.supplier
            && !self.suppliers.contains_key(supplier)
        {
            return Err(CatalogError::UnknownSupplier(supplier));
        }

        Ok(self.deliveries.insert(delivery))
    }

    /// Designate a delivery as the authoritative price of its ingredient.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is unknown or if the delivery belongs to a
    /// different ingredient.
    pub fn select_delivery(
        &mut self,
        ingredient: IngredientKey,
        delivery: DeliveryKey,
    ) -> Result<(), CatalogError> {
        let owner = self
            .deliveries
            .get(delivery)
            .ok_or(CatalogError::UnknownDelivery(delivery))?
            .ingredient;

        if owner != ingredient {
            return Err(CatalogError::DeliveryIngredientMismatch {
                delivery,
                ingredient,
                owner,
            });
        }

        let record = self
            .ingredients
            .get_mut(ingredient)
            .ok_or(CatalogError::UnknownIngredient(ingredient))?;

        record.selected_delivery = Some(delivery);

        debug!(ingredient = %record.name, ?delivery, "selected delivery price");

        Ok(())
    }

    /// Remove the selected delivery of an ingredient, leaving it unpriced.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownIngredient`] if the ingredient does not exist.
    pub fn clear_selected_delivery(
        &mut self,
        ingredient: IngredientKey,
    ) -> Result<(), CatalogError> {
        let record = self
            .ingredients
            .get_mut(ingredient)
            .ok_or(CatalogError::UnknownIngredient(ingredient))?;

        record.selected_delivery = None;

        Ok(())
    }

    /// Add a recipe.
    ///
    /// A new recipe cannot be referenced by anything yet, so its components only
    /// need to exist for the composition to stay acyclic.
    ///
    /// # Errors
    ///
    /// Returns an error if a component references an unknown ingredient or recipe,
    /// or if the name is already taken.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<RecipeKey, CatalogError> {
        self.recipe_names.ensure_free(&recipe.name)?;
        self.ensure_components_exist(&recipe.components)?;

        let name = recipe.name.clone();
        let key = self.recipes.insert(recipe);

        self.recipe_names.insert(name, key);

        Ok(key)
    }

    /// Replace the components of an existing recipe.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CyclicComposition`] if the recipe would end up
    /// containing itself, directly or through other recipes, or an error if a
    /// component references an unknown ingredient or recipe.
    pub fn set_recipe_components(
        &mut self,
        recipe: RecipeKey,
        components: impl IntoIterator<Item = Component>,
    ) -> Result<(), CatalogError> {
        if !self.recipes.contains_key(recipe) {
            return Err(CatalogError::UnknownRecipe(recipe));
        }

        let components: Components = components.into_iter().collect();

        self.ensure_components_exist(&components)?;

        let graph = CompositionGraph::from_recipes(&self.recipes, Some(recipe));

        for child in components.iter().filter_map(Component::recipe_key) {
            if let Some(path) = graph.cycle_through(recipe, child) {
                warn!(?path, "rejected cyclic recipe composition");

                return Err(CatalogError::CyclicComposition { path });
            }
        }

        if let Some(record) = self.recipes.get_mut(recipe) {
            record.components = components;
        }

        Ok(())
    }

    /// Add a dish.
    ///
    /// # Errors
    ///
    /// Returns an error if a component references an unknown ingredient or recipe,
    /// or if the name is already taken.
    pub fn add_dish(&mut self, dish: Dish) -> Result<DishKey, CatalogError> {
        self.dish_names.ensure_free(&dish.name)?;
        self.ensure_components_exist(&dish.components)?;

        let name = dish.name.clone();
        let key = self.dishes.insert(dish);

        self.dish_names.insert(name, key);

        Ok(key)
    }

    /// Check the whole recipe composition for cycles.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::CyclicComposition`] with the recipes of one cycle.
    pub fn validate(&self) -> Result<(), CatalogError> {
        match CompositionGraph::from_recipes(&self.recipes, None).find_cycle() {
            Some(path) => Err(CatalogError::CyclicComposition { path }),
            None => Ok(()),
        }
    }

    /// Get a supplier.
    pub fn supplier(&self, key: SupplierKey) -> Option<&Supplier> {
        self.suppliers.get(key)
    }

    /// Get a delivery.
    pub fn delivery(&self, key: DeliveryKey) -> Option<&Delivery> {
        self.deliveries.get(key)
    }

    /// Get an ingredient.
    pub fn ingredient(&self, key: IngredientKey) -> Option<&Ingredient> {
        self.ingredients.get(key)
    }

    /// Get a recipe.
    pub fn recipe(&self, key: RecipeKey) -> Option<&Recipe> {
        self.recipes.get(key)
    }

    /// Get a dish.
    pub fn dish(&self, key: DishKey) -> Option<&Dish> {
        self.dishes.get(key)
    }

    /// Find a supplier by name.
    pub fn supplier_by_name(&self, name: &str) -> Option<SupplierKey> {
        self.supplier_names.get(name)
    }

    /// Find an ingredient by name.
    pub fn ingredient_by_name(&self, name: &str) -> Option<IngredientKey> {
        self.ingredient_names.get(name)
    }

    /// Find a recipe by name.
    pub fn recipe_by_name(&self, name: &str) -> Option<RecipeKey> {
        self.recipe_names.get(name)
    }

    /// Find a dish by name.
    pub fn dish_by_name(&self, name: &str) -> Option<DishKey> {
        self.dish_names.get(name)
    }

    /// Iterate over all ingredients.
    pub fn ingredients(&self) -> impl Iterator<Item = (IngredientKey, &Ingredient)> {
        self.ingredients.iter()
    }

    /// Iterate over all recipes.
    pub fn recipes(&self) -> impl Iterator<Item = (RecipeKey, &Recipe)> {
        self.recipes.iter()
    }

    /// Iterate over all dishes.
    pub fn dishes(&self) -> impl Iterator<Item = (DishKey, &Dish)> {
        self.dishes.iter()
    }

    /// Iterate over the deliveries of one ingredient.
    pub fn deliveries_for(
        &self,
        ingredient: IngredientKey,
    ) -> impl Iterator<Item = (DeliveryKey, &Delivery)> {
        self.deliveries
            .iter()
            .filter(move |(_, delivery)| delivery.ingredient == ingredient)
    }

    /// The selected delivery price of an ingredient, if one is selected.
    pub fn selected_price(&self, ingredient: IngredientKey) -> Option<&DeliveryPrice> {
        self.ingredients
            .get(ingredient)?
            .selected_delivery
            .and_then(|key| self.deliveries.get(key))
            .map(|delivery| &delivery.price)
    }

    /// Mutable access that bypasses composition checks, for building corrupt snapshots.
    #[cfg(test)]
    pub(crate) fn recipe_mut(&mut self, key: RecipeKey) -> Option<&mut Recipe> {
        self.recipes.get_mut(key)
    }

    /// Display name of a component's ingredient or recipe.
    pub fn component_name(&self, item: ComponentRef) -> Option<&str> {
        match item {
            ComponentRef::Ingredient(key) => self.ingredients.get(key).map(|i| i.name.as_str()),
            ComponentRef::Recipe(key) => self.recipes.get(key).map(|r| r.name.as_str()),
        }
    }

    fn ensure_components_exist(&self, components: &[Component]) -> Result<(), CatalogError> {
        components
            .iter()
            .try_for_each(|component| match component.item {
                ComponentRef::Ingredient(key) if !self.ingredients.contains_key(key) => {
                    Err(CatalogError::UnknownIngredient(key))
                }
                ComponentRef::Recipe(key) if !self.recipes.contains_key(key) => {
                    Err(CatalogError::UnknownRecipe(key))
                }
                _ => Ok(()),
            })
    }
}

/// Name -> key lookup for one kind of record.
#[derive(Debug, Clone)]
struct NameIndex<K> {
    kind: &'static str,
    keys: FxHashMap<String, K>,
}

impl<K: Copy> NameIndex<K> {
    fn new(kind: &'static str) -> Self {
        Self {
            kind,
            keys: FxHashMap::default(),
        }
    }

    fn ensure_free(&self, name: &str) -> Result<(), CatalogError> {
        if self.keys.contains_key(name) {
            return Err(CatalogError::DuplicateName {
                kind: self.kind,
                name: name.to_string(),
            });
        }

        Ok(())
    }

    fn insert(&mut self, name: String, key: K) {
        self.keys.insert(name, key);
    }

    fn get(&self, name: &str) -> Option<K> {
        self.keys.get(name).copied()
    }
}
