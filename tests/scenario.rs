//! Integration test for the reference costing scenario.
//!
//! - Ingredient X: 10.00 GBP for 2 kg -> 5.00 / kg
//! - Recipe R: 2 kg of X, yields 4 kg -> total 10.00, 2.50 / kg
//! - Dish D: 1 kg of R, multiplier 3, target 6.00 -> 7.50, over target

use rust_decimal::Decimal;
use testresult::TestResult;

use plated::{
    catalog::CatalogError,
    costing::{Cost, UnavailableReason},
    fixtures::{Fixture, FixtureError},
};

#[test]
fn scenario_costs_roll_up_from_delivery_to_dish() -> TestResult {
    let fixture = Fixture::from_set("scenario")?;
    let costs = fixture.aggregator()?;

    let x = fixture.ingredient_key("x")?;
    let r = fixture.recipe_key("r")?;
    let d = fixture.dish_key("d")?;

    assert_eq!(costs.unit_cost(x)?, Cost::Priced(Decimal::new(5, 0)));
    assert_eq!(costs.total_cost(r)?, Cost::Priced(Decimal::new(10, 0)));
    assert_eq!(costs.per_unit_cost(r)?, Cost::Priced(Decimal::new(25, 1)));

    let dish = costs.dish_total(d)?;

    assert_eq!(dish.ingredient_cost, Cost::Priced(Decimal::new(25, 1)));
    assert_eq!(dish.total, Cost::Priced(Decimal::new(75, 1)));
    assert_eq!(dish.target_price, Some(Decimal::new(6, 0)));
    assert_eq!(dish.exceeds_target(), Some(true));

    Ok(())
}

#[test]
fn scenario_without_selected_price_is_unavailable() -> TestResult {
    let yaml = r"
currency: GBP
ingredients:
  x:
    name: Ingredient X
    unit: kg
    deliveries:
      - price: 10.00 GBP
        amount: 2 kg
recipes:
  r:
    name: Recipe R
    yield: 4 kg
    components:
      - ingredient: x
        amount: 2 kg
";

    let mut fixture = Fixture::new();

    fixture.load_catalog_str(yaml)?;

    let costs = fixture.aggregator()?;
    let total = costs.total_cost(fixture.recipe_key("r")?)?;

    assert_eq!(
        total.unavailability().map(|unavailable| unavailable.reason),
        Some(UnavailableReason::NoPriceSelected)
    );
    assert_eq!(total.amount(), None);

    Ok(())
}

#[test]
fn cyclic_fixture_is_rejected() {
    let result = Fixture::from_set("cyclic");

    assert!(matches!(
        result,
        Err(FixtureError::Catalog(CatalogError::CyclicComposition { path })) if path.len() == 3
    ));
}
