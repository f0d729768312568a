//! Costing
//!
//! Bottom-up evaluation of the costing graph. Ingredients are leaves priced from
//! their selected delivery; recipes sum their components and are consumed by other
//! recipes and dishes per unit of yield.
//!
//! A missing price never fails a calculation. It produces [`Cost::Unavailable`],
//! which propagates to every recipe and dish above it. Only structural corruption
//! (a recipe containing itself, a dangling key) and amounts beyond the decimal
//! range are errors.

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::catalog::{
    Catalog, Component, ComponentRef, Dish, DishKey, IngredientKey, Recipe, RecipeKey,
};

pub mod breakdown;
pub mod cost;
pub mod dish;
pub mod error;
pub mod reference;

pub use breakdown::{CostBreakdown, CostLine};
pub use cost::{Cost, Unavailable, UnavailableReason};
pub use dish::DishCosting;
pub use error::CostError;
pub use reference::IngredientReference;

/// Recipes on the current recursion path, outermost first.
type RecipePath = SmallVec<[RecipeKey; 8]>;

/// Computes costs over a borrowed catalog snapshot.
///
/// The aggregator holds no state of its own: every call walks the catalog afresh,
/// so repeated calls over an unchanged catalog give identical results.
#[derive(Debug, Clone, Copy)]
pub struct CostAggregator<'c> {
    catalog: &'c Catalog,
}

impl<'c> CostAggregator<'c> {
    /// Create an aggregator over `catalog`.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog being costed.
    pub fn catalog(self) -> &'c Catalog {
        self.catalog
    }

    /// Resolve the costing view of an ingredient.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::UnknownIngredient`] if the ingredient is not in the catalog.
    pub fn ingredient_reference(
        self,
        key: IngredientKey,
    ) -> Result<IngredientReference<'c>, CostError> {
        let ingredient = self
            .catalog
            .ingredient(key)
            .ok_or(CostError::UnknownIngredient(key))?;

        Ok(IngredientReference {
            ingredient: key,
            unit: ingredient.unit,
            source_price: self.catalog.selected_price(key),
            piece_weight: ingredient.piece_weight,
        })
    }

    /// Cost of one unit of an ingredient, in the unit recipes consume it in.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::UnknownIngredient`] if the ingredient is not in the catalog,
    /// or [`CostError::Overflow`] if its unit cost leaves the decimal range.
    pub fn unit_cost(self, key: IngredientKey) -> Result<Cost, CostError> {
        let cost = self.ingredient_reference(key)?.unit_cost()?;

        if let Some(unavailable) = cost.unavailability() {
            debug!(
                ingredient = ?key,
                reason = %unavailable.reason,
                "ingredient cost unavailable"
            );
        }

        Ok(cost)
    }

    /// Total cost of everything that goes into a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::CyclicComposition`] if the recipe contains itself, an
    /// unknown-key error if a component is missing from the catalog, or
    /// [`CostError::Overflow`] if a cost leaves the decimal range.
    pub fn total_cost(self, key: RecipeKey) -> Result<Cost, CostError> {
        let mut path = RecipePath::new();

        Ok(self.recipe_breakdown_on_path(key, &mut path)?.total)
    }

    /// Cost of one unit of a recipe's yield.
    ///
    /// A zero yield makes the cost [`UnavailableReason::ZeroYield`].
    ///
    /// # Errors
    ///
    /// Same as [`CostAggregator::total_cost`].
    pub fn per_unit_cost(self, key: RecipeKey) -> Result<Cost, CostError> {
        let recipe = self.recipe(key)?;
        let total = self.total_cost(key)?;

        per_unit(total, key, recipe)
    }

    /// Cost of a single component: its unit cost scaled by the amount consumed.
    ///
    /// # Errors
    ///
    /// Same as [`CostAggregator::total_cost`].
    pub fn component_cost(self, component: &Component) -> Result<Cost, CostError> {
        let mut path = RecipePath::new();

        Ok(self.line(component, &mut path)?.line_cost)
    }

    /// Per-component costs of an arbitrary component list.
    ///
    /// # Errors
    ///
    /// Same as [`CostAggregator::total_cost`].
    pub fn breakdown(self, components: &[Component]) -> Result<CostBreakdown, CostError> {
        let mut path = RecipePath::new();

        self.lines(components, &mut path)
    }

    /// Per-component costs of a recipe.
    ///
    /// # Errors
    ///
    /// Same as [`CostAggregator::total_cost`].
    pub fn recipe_breakdown(self, key: RecipeKey) -> Result<CostBreakdown, CostError> {
        let mut path = RecipePath::new();

        self.recipe_breakdown_on_path(key, &mut path)
    }

    /// Per-component costs of a dish, before its multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::UnknownDish`] if the dish is not in the catalog, otherwise
    /// the same as [`CostAggregator::total_cost`].
    pub fn dish_breakdown(self, key: DishKey) -> Result<CostBreakdown, CostError> {
        self.breakdown(self.dish(key)?.components())
    }

    /// Marked-up cost of a dish, with its target and menu prices.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::UnknownDish`] if the dish is not in the catalog, otherwise
    /// the same as [`CostAggregator::total_cost`].
    pub fn dish_total(self, key: DishKey) -> Result<DishCosting, CostError> {
        let dish = self.dish(key)?;
        let ingredient_cost = self.breakdown(dish.components())?.total;
        let total = ingredient_cost
            .checked_scale(dish.multiplier)
            .ok_or(CostError::Overflow)?;

        debug!(dish = %dish.name, ?total, "costed dish");

        Ok(DishCosting {
            dish: key,
            ingredient_cost,
            multiplier: dish.multiplier,
            total,
            target_price: dish.target_price,
            menu_price: dish.menu_price,
        })
    }

    fn recipe_breakdown_on_path(
        self,
        key: RecipeKey,
        path: &mut RecipePath,
    ) -> Result<CostBreakdown, CostError> {
        if path.contains(&key) {
            let mut cycle = path.to_vec();

            cycle.push(key);

            warn!(path = ?cycle, "cyclic recipe composition");

            return Err(CostError::CyclicComposition { path: cycle });
        }

        let recipe = self.recipe(key)?;

        path.push(key);

        let breakdown = self.lines(recipe.components(), path);

        path.pop();

        let breakdown = breakdown?;

        debug!(recipe = %recipe.name, total = ?breakdown.total, "costed recipe");

        Ok(breakdown)
    }

    fn lines(
        self,
        components: &[Component],
        path: &mut RecipePath,
    ) -> Result<CostBreakdown, CostError> {
        // Every component is evaluated, even after one is unavailable, so that a
        // cycle further down the list is still reported.
        let lines = components
            .iter()
            .map(|component| self.line(component, path))
            .collect::<Result<SmallVec<[CostLine; 8]>, CostError>>()?;

        CostBreakdown::from_lines(lines)
    }

    fn line(self, component: &Component, path: &mut RecipePath) -> Result<CostLine, CostError> {
        let unit_cost = match component.item {
            ComponentRef::Ingredient(key) => self.unit_cost(key)?,
            ComponentRef::Recipe(key) => {
                let recipe = self.recipe(key)?;
                let total = self.recipe_breakdown_on_path(key, path)?.total;

                per_unit(total, key, recipe)?
            }
        };

        let line_cost = unit_cost
            .checked_scale(component.amount)
            .ok_or(CostError::Overflow)?;

        trace!(item = ?component.item, amount = %component.amount, ?line_cost, "costed component");

        Ok(CostLine {
            item: component.item,
            amount: component.amount,
            unit_cost,
            line_cost,
        })
    }

    fn recipe(self, key: RecipeKey) -> Result<&'c Recipe, CostError> {
        self.catalog
            .recipe(key)
            .ok_or(CostError::UnknownRecipe(key))
    }

    fn dish(self, key: DishKey) -> Result<&'c Dish, CostError> {
        self.catalog.dish(key).ok_or(CostError::UnknownDish(key))
    }
}

/// Divide a recipe's total by its yield.
fn per_unit(total: Cost, key: RecipeKey, recipe: &Recipe) -> Result<Cost, CostError> {
    let zero_yield = Unavailable {
        item: ComponentRef::Recipe(key),
        reason: UnavailableReason::ZeroYield,
    };

    total
        .checked_divide(recipe.yield_amount, zero_yield)
        .ok_or(CostError::Overflow)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::{
        catalog::{Delivery, DeliveryPrice, Ingredient},
        units::Unit,
    };

    use super::*;

    fn whole(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    /// Ingredient X (10 per 2 kg), recipe R (4 kg from 2 kg X), dish D (1 kg R, x3, target 6).
    fn scenario() -> Result<(Catalog, IngredientKey, RecipeKey, DishKey), Box<dyn std::error::Error>>
    {
        let mut catalog = Catalog::new(GBP);

        let x = catalog.add_ingredient(Ingredient::new("X", Unit::Kilogram))?;
        let delivery = catalog.add_delivery(Delivery::new(
            x,
            DeliveryPrice::new(whole(10), whole(2), Unit::Kilogram),
        ))?;

        catalog.select_delivery(x, delivery)?;

        let r = catalog.add_recipe(
            Recipe::new("R", whole(4), Unit::Kilogram)
                .with_components([Component::ingredient(x, whole(2))]),
        )?;

        let d = catalog.add_dish(
            Dish::new("D", whole(3))
                .with_components([Component::recipe(r, whole(1))])
                .with_target_price(whole(6)),
        )?;

        Ok((catalog, x, r, d))
    }

    #[test]
    fn end_to_end_scenario() -> TestResult {
        let (catalog, x, r, d) = scenario()?;
        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(aggregator.unit_cost(x)?, Cost::Priced(whole(5)));
        assert_eq!(aggregator.total_cost(r)?, Cost::Priced(whole(10)));
        assert_eq!(aggregator.per_unit_cost(r)?, Cost::Priced(dec(25, 1)));

        let dish = aggregator.dish_total(d)?;

        assert_eq!(dish.ingredient_cost, Cost::Priced(dec(25, 1)));
        assert_eq!(dish.total, Cost::Priced(dec(75, 1)));
        assert_eq!(dish.exceeds_target(), Some(true));

        Ok(())
    }

    #[test]
    fn total_cost_is_idempotent() -> TestResult {
        let (catalog, _, r, _) = scenario()?;
        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(aggregator.total_cost(r)?, aggregator.total_cost(r)?);

        Ok(())
    }

    #[test]
    fn total_cost_equals_sum_of_component_costs() -> TestResult {
        let (mut catalog, x, r, _) = scenario()?;

        let eggs = catalog.add_ingredient(
            Ingredient::new("Eggs", Unit::Kilogram).with_piece_weight(dec(6, 2)),
        )?;
        let tray = catalog.add_delivery(Delivery::new(
            eggs,
            DeliveryPrice::new(dec(3, 1), whole(1), Unit::Piece),
        ))?;

        catalog.select_delivery(eggs, tray)?;

        let components = [
            Component::ingredient(x, dec(15, 1)),
            Component::ingredient(eggs, dec(12, 2)),
            Component::recipe(r, whole(2)),
        ];
        let pasta = catalog.add_recipe(
            Recipe::new("Pasta", whole(3), Unit::Kilogram).with_components(components),
        )?;

        let aggregator = CostAggregator::new(&catalog);
        let mut expected = Cost::ZERO;

        for component in &components {
            expected = expected
                .checked_add(aggregator.component_cost(component)?)
                .ok_or("component costs overflowed")?;
        }

        // 1.5 * 5 + 0.12 * (0.3 / 0.06) + 2 * 2.5
        assert_eq!(expected, Cost::Priced(dec(131, 1)));
        assert_eq!(aggregator.total_cost(pasta)?, expected);
        assert_eq!(
            aggregator.per_unit_cost(pasta)?,
            Cost::Priced(expected.amount().ok_or("pasta is unpriced")? / whole(3))
        );

        Ok(())
    }

    #[test]
    fn missing_price_propagates_to_recipe_and_dish() -> TestResult {
        let (mut catalog, x, r, d) = scenario()?;

        catalog.clear_selected_delivery(x)?;

        let aggregator = CostAggregator::new(&catalog);
        let expected = Cost::Unavailable(Unavailable {
            item: ComponentRef::Ingredient(x),
            reason: UnavailableReason::NoPriceSelected,
        });

        assert_eq!(aggregator.unit_cost(x)?, expected);
        assert_eq!(aggregator.total_cost(r)?, expected);
        assert_eq!(aggregator.per_unit_cost(r)?, expected);

        let dish = aggregator.dish_total(d)?;

        assert_eq!(dish.total, expected);
        assert_eq!(dish.exceeds_target(), None);

        Ok(())
    }

    #[test]
    fn zero_yield_recipe_has_no_per_unit_cost() -> TestResult {
        let (mut catalog, x, _, _) = scenario()?;

        let glaze = catalog.add_recipe(
            Recipe::new("Glaze", Decimal::ZERO, Unit::Kilogram)
                .with_components([Component::ingredient(x, whole(1))]),
        )?;
        let cake = catalog.add_recipe(
            Recipe::new("Cake", whole(1), Unit::Kilogram)
                .with_components([Component::recipe(glaze, whole(1))]),
        )?;

        let aggregator = CostAggregator::new(&catalog);
        let zero_yield = Cost::Unavailable(Unavailable {
            item: ComponentRef::Recipe(glaze),
            reason: UnavailableReason::ZeroYield,
        });

        assert_eq!(aggregator.total_cost(glaze)?, Cost::Priced(whole(5)));
        assert_eq!(aggregator.per_unit_cost(glaze)?, zero_yield);
        assert_eq!(aggregator.total_cost(cake)?, zero_yield);

        Ok(())
    }

    #[test]
    fn cycle_is_rejected_without_recursing_forever() -> TestResult {
        let (mut catalog, _, r, _) = scenario()?;

        let b = catalog.add_recipe(
            Recipe::new("B", whole(1), Unit::Kilogram)
                .with_components([Component::recipe(r, whole(1))]),
        )?;

        // The catalog refuses this edit, so build the corrupt snapshot directly.
        if let Some(recipe) = catalog.recipe_mut(r) {
            recipe.components.push(Component::recipe(b, whole(1)));
        }

        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(
            aggregator.total_cost(r),
            Err(CostError::CyclicComposition {
                path: vec![r, b, r]
            })
        );
        assert_eq!(
            aggregator.total_cost(b),
            Err(CostError::CyclicComposition {
                path: vec![b, r, b]
            })
        );

        Ok(())
    }

    #[test]
    fn cycle_behind_unavailable_component_is_still_reported() -> TestResult {
        let (mut catalog, x, r, _) = scenario()?;

        catalog.clear_selected_delivery(x)?;

        if let Some(recipe) = catalog.recipe_mut(r) {
            recipe.components.push(Component::recipe(r, whole(1)));
        }

        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(
            aggregator.total_cost(r),
            Err(CostError::CyclicComposition { path: vec![r, r] })
        );

        Ok(())
    }

    #[test]
    fn shared_sub_recipe_is_not_a_cycle() -> TestResult {
        let (mut catalog, _, r, _) = scenario()?;

        let platter = catalog.add_recipe(
            Recipe::new("Platter", whole(1), Unit::Kilogram).with_components([
                Component::recipe(r, whole(1)),
                Component::recipe(r, whole(1)),
            ]),
        )?;

        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(aggregator.total_cost(platter)?, Cost::Priced(whole(5)));

        Ok(())
    }

    #[test]
    fn costs_beyond_the_decimal_range_are_errors() -> TestResult {
        let mut catalog = Catalog::new(GBP);

        let saffron = catalog.add_ingredient(Ingredient::new("Saffron", Unit::Kilogram))?;
        let delivery = catalog.add_delivery(Delivery::new(
            saffron,
            DeliveryPrice::new(Decimal::MAX, whole(1), Unit::Kilogram),
        ))?;

        catalog.select_delivery(saffron, delivery)?;

        let doubled = catalog.add_recipe(
            Recipe::new("Doubled", whole(1), Unit::Kilogram)
                .with_components([Component::ingredient(saffron, whole(2))]),
        )?;
        let summed = catalog.add_recipe(
            Recipe::new("Summed", whole(1), Unit::Kilogram).with_components([
                Component::ingredient(saffron, whole(1)),
                Component::ingredient(saffron, whole(1)),
            ]),
        )?;
        let marked_up = catalog.add_dish(
            Dish::new("Marked up", whole(2))
                .with_components([Component::ingredient(saffron, whole(1))]),
        )?;

        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(aggregator.unit_cost(saffron)?, Cost::Priced(Decimal::MAX));
        assert_eq!(aggregator.total_cost(doubled), Err(CostError::Overflow));
        assert_eq!(aggregator.total_cost(summed), Err(CostError::Overflow));
        assert_eq!(aggregator.per_unit_cost(summed), Err(CostError::Overflow));
        assert_eq!(aggregator.dish_total(marked_up), Err(CostError::Overflow));

        Ok(())
    }

    #[test]
    fn unknown_keys_are_errors() {
        let catalog = Catalog::new(GBP);
        let aggregator = CostAggregator::new(&catalog);

        assert_eq!(
            aggregator.unit_cost(IngredientKey::default()),
            Err(CostError::UnknownIngredient(IngredientKey::default()))
        );
        assert_eq!(
            aggregator.total_cost(RecipeKey::default()),
            Err(CostError::UnknownRecipe(RecipeKey::default()))
        );
        assert!(matches!(
            aggregator.dish_total(DishKey::default()),
            Err(CostError::UnknownDish(_))
        ));
    }

    #[test]
    fn breakdown_lists_every_component() -> TestResult {
        let (mut catalog, x, r, d) = scenario()?;

        let salt = catalog.add_ingredient(Ingredient::new("Salt", Unit::Kilogram))?;
        let components = [
            Component::ingredient(x, whole(1)),
            Component::ingredient(salt, dec(1, 2)),
            Component::recipe(r, whole(2)),
        ];

        let aggregator = CostAggregator::new(&catalog);
        let breakdown = aggregator.breakdown(&components)?;

        assert_eq!(breakdown.lines.len(), 3);
        assert_eq!(
            breakdown.lines.first().map(|line| line.line_cost),
            Some(Cost::Priced(whole(5)))
        );
        assert_eq!(
            breakdown.lines.get(2).map(|line| line.unit_cost),
            Some(Cost::Priced(dec(25, 1)))
        );
        assert_eq!(breakdown.unavailable_lines().count(), 1);
        assert!(!breakdown.total.is_available());

        let dish = aggregator.dish_breakdown(d)?;

        assert_eq!(dish.total, Cost::Priced(dec(25, 1)));

        Ok(())
    }
}
