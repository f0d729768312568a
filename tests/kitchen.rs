//! Integration test for the kitchen fixture set.
//!
//! Unit costs from the selected deliveries:
//!
//! - Flour: 18.00 / 16 kg = 1.125 / kg
//! - Butter: 9.50 / kg
//! - Eggs: 0.30 per piece, 0.06 kg per piece = 5.00 / kg
//! - Sugar: 1.20 / kg
//! - Lemons: 4.80 / 12 = 0.40 / pc
//! - Vanilla and saffron have no selected delivery
//!
//! Recipes:
//!
//! - Sweet Pastry: 0.675 + 2.85 + 0.18 + 0.60 = 4.305, over 1.2 kg = 3.5875 / kg
//! - Lemon Curd: 1.60 + 0.24 + 1.425 + 1.20 = 4.465, over 0.8 kg = 5.58125 / kg
//! - Lemon Tart: 0.4 kg pastry + 0.8 kg curd = 1.435 + 4.465 = 5.90, over 8 pc = 0.7375 / pc
//!
//! Dishes:
//!
//! - Slice of Lemon Tart: 0.7375 x 3.5 = 2.58125, above the 2.50 target

use rust_decimal::Decimal;
use testresult::TestResult;

use plated::{
    catalog::ComponentRef,
    costing::{Cost, UnavailableReason},
    fixtures::Fixture,
    report::CostSheet,
};

#[test]
fn nested_recipes_cost_per_unit_of_yield() -> TestResult {
    let fixture = Fixture::from_set("kitchen")?;
    let costs = fixture.aggregator()?;

    assert_eq!(
        costs.unit_cost(fixture.ingredient_key("eggs")?)?,
        Cost::Priced(Decimal::new(5, 0))
    );
    assert_eq!(
        costs.per_unit_cost(fixture.recipe_key("pastry")?)?,
        Cost::Priced(Decimal::new(35_875, 4))
    );
    assert_eq!(
        costs.total_cost(fixture.recipe_key("lemon-curd")?)?,
        Cost::Priced(Decimal::new(4465, 3))
    );
    assert_eq!(
        costs.total_cost(fixture.recipe_key("lemon-tart")?)?,
        Cost::Priced(Decimal::new(59, 1))
    );
    assert_eq!(
        costs.per_unit_cost(fixture.recipe_key("lemon-tart")?)?,
        Cost::Priced(Decimal::new(7375, 4))
    );

    Ok(())
}

#[test]
fn dish_margin_flags_slice_over_target() -> TestResult {
    let fixture = Fixture::from_set("kitchen")?;
    let costs = fixture.aggregator()?;
    let slice = costs.dish_total(fixture.dish_key("lemon-tart-slice")?)?;

    assert_eq!(slice.total, Cost::Priced(Decimal::new(258_125, 5)));
    assert_eq!(slice.exceeds_target(), Some(true));
    assert_eq!(
        slice.gross_margin(),
        Some(Decimal::new(65, 1) - Decimal::new(7375, 4))
    );
    assert!(slice.food_cost_percentage().is_some());

    Ok(())
}

#[test]
fn unpriced_ingredients_make_dishes_unavailable() -> TestResult {
    let fixture = Fixture::from_set("kitchen")?;
    let costs = fixture.aggregator()?;

    let vanilla = fixture.ingredient_key("vanilla")?;
    let custard = costs.dish_total(fixture.dish_key("tart-with-custard")?)?;

    let unavailable = custard
        .total
        .unavailability()
        .ok_or("custard dish should be unavailable")?;

    assert_eq!(unavailable.item, ComponentRef::Ingredient(vanilla));
    assert_eq!(unavailable.reason, UnavailableReason::NoPriceSelected);
    assert_eq!(custard.exceeds_target(), None);

    let bun = costs.dish_total(fixture.dish_key("saffron-bun")?)?;

    assert!(!bun.total.is_available());

    Ok(())
}

#[test]
fn repeated_calculations_agree() -> TestResult {
    let fixture = Fixture::from_set("kitchen")?;
    let costs = fixture.aggregator()?;

    for (_, dish) in fixture.dish_keys() {
        assert_eq!(costs.dish_total(dish)?, costs.dish_total(dish)?);
    }

    for (_, recipe) in fixture.recipe_keys() {
        assert_eq!(costs.total_cost(recipe)?, costs.total_cost(recipe)?);
    }

    Ok(())
}

#[test]
fn cost_sheets_render_every_dish() -> TestResult {
    let fixture = Fixture::from_set("kitchen")?;
    let costs = fixture.aggregator()?;
    let mut out = Vec::new();

    for (_, dish) in fixture.dish_keys() {
        CostSheet::for_dish(costs, dish)?.write_to(&mut out)?;
    }

    let output = String::from_utf8(out)?;

    assert!(output.contains("Slice of Lemon Tart"));
    assert!(output.contains("Lemon Tart with Custard"));
    assert!(output.contains("N/A (select a delivery price for Vanilla Pods)"));
    assert!(output.contains("N/A (select a delivery price for Saffron)"));

    Ok(())
}
