//! Fixtures
//!
//! Catalog snapshots described in YAML, loaded from `<base>/catalog/<name>.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{
        Catalog, CatalogError, Component, Delivery, DeliveryPrice, Dish, DishKey, Ingredient,
        IngredientKey, Recipe, RecipeKey, Supplier, SupplierKey,
    },
    costing::CostAggregator,
    fixtures::catalog::{CatalogFixture, ComponentFixture, DishFixture, IngredientFixture},
    units::{Measure, Unit},
};

pub mod catalog;
pub mod quantities;

pub use quantities::{parse_currency, parse_price, parse_quantity};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid quantity format
    #[error("Invalid quantity format: {0}")]
    InvalidQuantity(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Supplier not found
    #[error("Supplier not found: {0}")]
    UnknownSupplier(String),

    /// Ingredient not found
    #[error("Ingredient not found: {0}")]
    UnknownIngredient(String),

    /// Recipe not found
    #[error("Recipe not found: {0}")]
    UnknownRecipe(String),

    /// Dish not found
    #[error("Dish not found: {0}")]
    UnknownDish(String),

    /// Component that names neither or both of an ingredient and a recipe
    #[error("Invalid component: {0}")]
    InvalidComponent(String),

    /// More than one delivery selected for an ingredient
    #[error("More than one delivery selected for ingredient: {0}")]
    MultipleSelectedDeliveries(String),

    /// Quantity in a unit that cannot measure the item
    #[error("Unit mismatch for {item}: expected {expected}, found {found}")]
    UnitMismatch {
        /// Key of the ingredient or recipe being measured
        item: String,
        /// Unit the item is measured in
        expected: Unit,
        /// Unit found in the fixture
        found: Unit,
    },

    /// No catalog loaded yet
    #[error("No catalog loaded")]
    NoCatalog,

    /// Catalog rejected a record
    #[error("Catalog rejected fixture: {0}")]
    Catalog(#[from] CatalogError),
}

/// String key -> catalog key mappings for lookups
#[derive(Debug, Default, Clone)]
struct FixtureKeys {
    suppliers: FxHashMap<String, SupplierKey>,
    ingredients: FxHashMap<String, IngredientKey>,
    recipes: FxHashMap<String, RecipeKey>,
    dishes: FxHashMap<String, DishKey>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the loaded files
    catalog: Option<Catalog>,

    keys: FixtureKeys,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            keys: FixtureKeys::default(),
        }
    }

    /// Load a complete fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_catalog(name)?;

        Ok(fixture)
    }

    /// Load a catalog from a YAML fixture file
    ///
    /// Loading more than one file adds to the same catalog; every file must use the
    /// same currency.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price, quantity or
    /// reference is invalid, or if the catalog rejects a record.
    pub fn load_catalog(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("catalog").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        self.load_catalog_str(&contents)
    }

    /// Load a catalog from YAML text
    ///
    /// # Errors
    ///
    /// Same as [`Fixture::load_catalog`], except for IO errors.
    pub fn load_catalog_str(&mut self, contents: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;
        let currency = parse_currency(&fixture.currency)?;

        // Work on copies so a file that fails halfway leaves nothing behind.
        let mut catalog = match &self.catalog {
            Some(existing) => {
                ensure_currency(existing.currency(), currency)?;

                existing.clone()
            }
            None => Catalog::new(currency),
        };
        let mut keys = self.keys.clone();

        for (key, supplier) in fixture.suppliers {
            let supplier_key = catalog.add_supplier(Supplier::new(supplier.name))?;

            keys.suppliers.insert(key, supplier_key);
        }

        for (key, ingredient) in fixture.ingredients {
            let ingredient_key = load_ingredient(&mut catalog, &keys, &key, ingredient)?;

            keys.ingredients.insert(key, ingredient_key);
        }

        // Recipes may use recipes defined later in the file: insert them all first,
        // then compose them so the catalog checks every edge for cycles.
        let mut compositions = Vec::with_capacity(fixture.recipes.len());

        for (key, recipe) in fixture.recipes {
            let (yield_amount, unit) = parse_quantity(&recipe.yield_amount)?;
            let recipe_key = catalog.add_recipe(Recipe::new(recipe.name, yield_amount, unit))?;

            keys.recipes.insert(key, recipe_key);
            compositions.push((recipe_key, recipe.components));
        }

        for (recipe_key, components) in compositions {
            let components = components
                .iter()
                .map(|component| load_component(&catalog, &keys, component))
                .collect::<Result<Vec<_>, _>>()?;

            catalog.set_recipe_components(recipe_key, components)?;
        }

        for (key, dish) in fixture.dishes {
            let dish_key = load_dish(&mut catalog, &keys, dish)?;

            keys.dishes.insert(key, dish_key);
        }

        debug!(
            ingredients = keys.ingredients.len(),
            recipes = keys.recipes.len(),
            dishes = keys.dishes.len(),
            "loaded catalog fixture"
        );

        self.catalog = Some(catalog);
        self.keys = keys;

        Ok(self)
    }

    /// Get the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog has been loaded.
    pub fn catalog(&self) -> Result<&Catalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCatalog)
    }

    /// Get a cost aggregator over the loaded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog has been loaded.
    pub fn aggregator(&self) -> Result<CostAggregator<'_>, FixtureError> {
        Ok(CostAggregator::new(self.catalog()?))
    }

    /// Get a supplier key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the supplier is not found.
    pub fn supplier_key(&self, key: &str) -> Result<SupplierKey, FixtureError> {
        lookup(&self.keys.suppliers, key, FixtureError::UnknownSupplier)
    }

    /// Get an ingredient key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the ingredient is not found.
    pub fn ingredient_key(&self, key: &str) -> Result<IngredientKey, FixtureError> {
        lookup(&self.keys.ingredients, key, FixtureError::UnknownIngredient)
    }

    /// Get a recipe key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe is not found.
    pub fn recipe_key(&self, key: &str) -> Result<RecipeKey, FixtureError> {
        lookup(&self.keys.recipes, key, FixtureError::UnknownRecipe)
    }

    /// Get a dish key by its string key
    ///
    /// # Errors
    ///
    /// Returns an error if the dish is not found.
    pub fn dish_key(&self, key: &str) -> Result<DishKey, FixtureError> {
        lookup(&self.keys.dishes, key, FixtureError::UnknownDish)
    }

    /// All dishes, sorted by their string key
    pub fn dish_keys(&self) -> Vec<(&str, DishKey)> {
        sorted(&self.keys.dishes)
    }

    /// All recipes, sorted by their string key
    pub fn recipe_keys(&self) -> Vec<(&str, RecipeKey)> {
        sorted(&self.keys.recipes)
    }
}

fn load_ingredient(
    catalog: &mut Catalog,
    keys: &FixtureKeys,
    key: &str,
    fixture: IngredientFixture,
) -> Result<IngredientKey, FixtureError> {
    let mut ingredient = Ingredient::new(fixture.name, fixture.unit);

    if let Some(piece_weight) = &fixture.piece_weight {
        let (weight, unit) = parse_quantity(piece_weight)?;

        if unit.measure() != Measure::Mass {
            return Err(FixtureError::UnitMismatch {
                item: key.to_string(),
                expected: Unit::Kilogram,
                found: unit,
            });
        }

        ingredient = ingredient.with_piece_weight(weight);
    }

    let ingredient_key = catalog.add_ingredient(ingredient)?;
    let mut selected = None;

    for delivery in fixture.deliveries {
        let total_price = checked_price(catalog, &delivery.price)?;
        let (total_amount, unit) = parse_quantity(&delivery.amount)?;
        let mut record = Delivery::new(
            ingredient_key,
            DeliveryPrice::new(total_price, total_amount, unit),
        );

        if let Some(supplier) = &delivery.supplier {
            record = record.from_supplier(lookup(
                &keys.suppliers,
                supplier,
                FixtureError::UnknownSupplier,
            )?);
        }

        let delivery_key = catalog.add_delivery(record)?;

        if delivery.selected {
            if selected.is_some() {
                return Err(FixtureError::MultipleSelectedDeliveries(key.to_string()));
            }

            selected = Some(delivery_key);
        }
    }

    if let Some(delivery_key) = selected {
        catalog.select_delivery(ingredient_key, delivery_key)?;
    }

    Ok(ingredient_key)
}

fn load_dish(
    catalog: &mut Catalog,
    keys: &FixtureKeys,
    fixture: DishFixture,
) -> Result<DishKey, FixtureError> {
    let components = fixture
        .components
        .iter()
        .map(|component| load_component(catalog, keys, component))
        .collect::<Result<Vec<_>, _>>()?;

    let mut dish = Dish::new(fixture.name, fixture.multiplier).with_components(components);

    if let Some(target_price) = &fixture.target_price {
        dish = dish.with_target_price(checked_price(catalog, target_price)?);
    }

    if let Some(menu_price) = &fixture.menu_price {
        dish = dish.with_menu_price(checked_price(catalog, menu_price)?);
    }

    Ok(catalog.add_dish(dish)?)
}

fn load_component(
    catalog: &Catalog,
    keys: &FixtureKeys,
    fixture: &ComponentFixture,
) -> Result<Component, FixtureError> {
    let (amount, unit) = parse_quantity(&fixture.amount)?;

    let (key, component, expected) = match (&fixture.ingredient, &fixture.recipe) {
        (Some(key), None) => {
            let ingredient_key =
                lookup(&keys.ingredients, key, FixtureError::UnknownIngredient)?;
            let ingredient = catalog
                .ingredient(ingredient_key)
                .ok_or_else(|| FixtureError::UnknownIngredient(key.clone()))?;

            (
                key,
                Component::ingredient(ingredient_key, amount),
                ingredient.unit,
            )
        }
        (None, Some(key)) => {
            let recipe_key = lookup(&keys.recipes, key, FixtureError::UnknownRecipe)?;
            let recipe = catalog
                .recipe(recipe_key)
                .ok_or_else(|| FixtureError::UnknownRecipe(key.clone()))?;

            (key, Component::recipe(recipe_key, amount), recipe.unit)
        }
        _ => {
            return Err(FixtureError::InvalidComponent(format!(
                "expected exactly one of 'ingredient' or 'recipe' for amount {}",
                fixture.amount
            )));
        }
    };

    if !unit.is_compatible_with(expected) {
        return Err(FixtureError::UnitMismatch {
            item: key.clone(),
            expected,
            found: unit,
        });
    }

    Ok(component)
}

/// Parse a price and check it is in the catalog currency.
fn checked_price(catalog: &Catalog, price: &str) -> Result<Decimal, FixtureError> {
    let (amount, currency) = parse_price(price)?;

    ensure_currency(catalog.currency(), currency)?;

    Ok(amount)
}

fn ensure_currency(expected: &Currency, found: &Currency) -> Result<(), FixtureError> {
    if expected != found {
        return Err(FixtureError::CurrencyMismatch(
            expected.iso_alpha_code.to_string(),
            found.iso_alpha_code.to_string(),
        ));
    }

    Ok(())
}

fn lookup<K: Copy>(
    keys: &FxHashMap<String, K>,
    key: &str,
    missing: fn(String) -> FixtureError,
) -> Result<K, FixtureError> {
    keys.get(key).copied().ok_or_else(|| missing(key.to_string()))
}

fn sorted<K: Copy>(keys: &FxHashMap<String, K>) -> Vec<(&str, K)> {
    let mut entries: Vec<(&str, K)> = keys
        .iter()
        .map(|(name, key)| (name.as_str(), *key))
        .collect();

    entries.sort_unstable_by_key(|(name, _)| *name);

    entries
}
