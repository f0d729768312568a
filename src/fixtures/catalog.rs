//! Catalog Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::units::Unit;

/// A catalog snapshot in YAML.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code every price is expressed in (e.g., "GBP")
    pub currency: String,

    /// Map of supplier key -> supplier fixture
    #[serde(default)]
    pub suppliers: FxHashMap<String, SupplierFixture>,

    /// Map of ingredient key -> ingredient fixture
    #[serde(default)]
    pub ingredients: FxHashMap<String, IngredientFixture>,

    /// Map of recipe key -> recipe fixture
    #[serde(default)]
    pub recipes: FxHashMap<String, RecipeFixture>,

    /// Map of dish key -> dish fixture
    #[serde(default)]
    pub dishes: FxHashMap<String, DishFixture>,
}

/// Supplier Fixture
#[derive(Debug, Deserialize)]
pub struct SupplierFixture {
    /// Supplier name
    pub name: String,
}

/// Ingredient Fixture
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IngredientFixture {
    /// Ingredient name
    pub name: String,

    /// Unit recipes consume the ingredient in
    pub unit: Unit,

    /// Weight of a single piece (e.g., "0.06 kg")
    pub piece_weight: Option<String>,

    /// Delivery prices on record
    #[serde(default)]
    pub deliveries: Vec<DeliveryFixture>,
}

/// Delivery Fixture
#[derive(Debug, Deserialize)]
pub struct DeliveryFixture {
    /// Supplier key, if known
    pub supplier: Option<String>,

    /// Total price paid (e.g., "10.00 GBP")
    pub price: String,

    /// Total amount delivered (e.g., "2 kg")
    pub amount: String,

    /// Whether this is the price used for costing
    #[serde(default)]
    pub selected: bool,
}

/// Recipe Fixture
#[derive(Debug, Deserialize)]
pub struct RecipeFixture {
    /// Recipe name
    pub name: String,

    /// Amount produced (e.g., "4 kg")
    #[serde(rename = "yield")]
    pub yield_amount: String,

    /// Ingredients and sub-recipes
    #[serde(default)]
    pub components: Vec<ComponentFixture>,
}

/// Dish Fixture
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DishFixture {
    /// Dish name
    pub name: String,

    /// Markup factor applied to the ingredient cost
    #[serde(default = "no_markup")]
    pub multiplier: Decimal,

    /// Price the marked-up cost should not exceed (e.g., "6.00 GBP")
    pub target_price: Option<String>,

    /// Price the dish is sold at (e.g., "12.00 GBP")
    pub menu_price: Option<String>,

    /// Ingredients and recipes on the plate
    #[serde(default)]
    pub components: Vec<ComponentFixture>,
}

/// Component Fixture
///
/// Exactly one of `ingredient` and `recipe` must be set.
#[derive(Debug, Deserialize)]
pub struct ComponentFixture {
    /// Ingredient key
    pub ingredient: Option<String>,

    /// Recipe key
    pub recipe: Option<String>,

    /// Amount consumed (e.g., "0.25 kg")
    pub amount: String,
}

fn no_markup() -> Decimal {
    Decimal::ONE
}
