//! Cost sheets
//!
//! Tabular rendering of recipe and dish costs. Every number comes from
//! [`CostAggregator`]; this module only formats.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::{Catalog, ComponentRef, DishKey, RecipeKey},
    costing::{Cost, CostAggregator, CostBreakdown, CostError, DishCosting},
    units::Unit,
};

mod terminal;

/// Errors that can occur when building or printing a cost sheet.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The costs could not be calculated.
    #[error(transparent)]
    Cost(#[from] CostError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One component row of a cost sheet.
#[derive(Debug, Clone)]
struct SheetRow {
    component: String,
    amount: String,
    unit_cost: String,
    line_cost: String,
    unavailable: bool,
}

/// Closing lines of a cost sheet.
#[derive(Debug, Clone)]
enum Summary {
    Recipe {
        total: String,
        yield_amount: String,
        per_unit: String,
    },
    Dish {
        ingredient_cost: String,
        multiplier: Decimal,
        total: String,
        target_price: String,
        over_target: Option<bool>,
        menu_price: String,
        food_cost: String,
    },
}

/// Cost sheet for a single recipe or dish.
#[derive(Debug, Clone)]
pub struct CostSheet {
    title: String,
    rows: SmallVec<[SheetRow; 8]>,
    summary: Summary,
}

impl CostSheet {
    /// Build the sheet for a recipe.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe cannot be costed.
    pub fn for_recipe(
        aggregator: CostAggregator<'_>,
        recipe: RecipeKey,
    ) -> Result<Self, ReportError> {
        let catalog = aggregator.catalog();
        let record = catalog
            .recipe(recipe)
            .ok_or(CostError::UnknownRecipe(recipe))?;

        let breakdown = aggregator.recipe_breakdown(recipe)?;
        let per_unit = aggregator.per_unit_cost(recipe)?;

        Ok(Self {
            title: record.name.clone(),
            rows: sheet_rows(catalog, &breakdown)?,
            summary: Summary::Recipe {
                total: cost_cell(catalog, &breakdown.total),
                yield_amount: quantity(record.yield_amount, record.unit),
                per_unit: format!("{} / {}", cost_cell(catalog, &per_unit), record.unit),
            },
        })
    }

    /// Build the sheet for a dish.
    ///
    /// # Errors
    ///
    /// Returns an error if the dish cannot be costed.
    pub fn for_dish(aggregator: CostAggregator<'_>, dish: DishKey) -> Result<Self, ReportError> {
        let catalog = aggregator.catalog();
        let record = catalog.dish(dish).ok_or(CostError::UnknownDish(dish))?;

        let breakdown = aggregator.dish_breakdown(dish)?;
        let costing = aggregator.dish_total(dish)?;

        Ok(Self {
            title: record.name.clone(),
            rows: sheet_rows(catalog, &breakdown)?,
            summary: dish_summary(catalog, &costing),
        })
    }

    /// Title of the sheet: the recipe or dish name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prints the cost sheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the sheet cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        writeln!(out, "\n {}", terminal::bold(&self.title)).map_err(|_err| ReportError::IO)?;

        write_sheet_table(&mut out, &self.rows)?;

        write_sheet_summary(&mut out, &self.summary)
    }
}

fn sheet_rows(
    catalog: &Catalog,
    breakdown: &CostBreakdown,
) -> Result<SmallVec<[SheetRow; 8]>, ReportError> {
    breakdown
        .lines
        .iter()
        .map(|line| -> Result<SheetRow, ReportError> {
            let (name, unit) = component_label(catalog, line.item)?;

            Ok(SheetRow {
                component: name.to_string(),
                amount: quantity(line.amount, unit),
                unit_cost: cost_cell(catalog, &line.unit_cost),
                line_cost: cost_cell(catalog, &line.line_cost),
                unavailable: !line.line_cost.is_available(),
            })
        })
        .collect()
}

fn component_label(catalog: &Catalog, item: ComponentRef) -> Result<(&str, Unit), CostError> {
    match item {
        ComponentRef::Ingredient(key) => catalog
            .ingredient(key)
            .map(|ingredient| (ingredient.name.as_str(), ingredient.unit))
            .ok_or(CostError::UnknownIngredient(key)),
        ComponentRef::Recipe(key) => catalog
            .recipe(key)
            .map(|recipe| (recipe.name.as_str(), recipe.unit))
            .ok_or(CostError::UnknownRecipe(key)),
    }
}

fn dish_summary(catalog: &Catalog, costing: &DishCosting) -> Summary {
    let currency = catalog.currency();

    Summary::Dish {
        ingredient_cost: cost_cell(catalog, &costing.ingredient_cost),
        multiplier: costing.multiplier,
        total: cost_cell(catalog, &costing.total),
        target_price: optional_money(costing.target_price, currency),
        over_target: costing.exceeds_target(),
        menu_price: optional_money(costing.menu_price, currency),
        food_cost: costing
            .food_cost_percentage()
            .map_or_else(|| "-".to_string(), |p| format!("{}%", percent_points(p))),
    }
}

/// Formats a cost, or explains what is missing when it is unavailable.
fn cost_cell(catalog: &Catalog, cost: &Cost) -> String {
    match cost {
        Cost::Priced(amount) => money(*amount, catalog.currency()),
        Cost::Unavailable(unavailable) => match catalog.component_name(unavailable.item) {
            Some(name) => format!("N/A ({} for {name})", unavailable.reason.prompt()),
            None => format!("N/A ({})", unavailable.reason.prompt()),
        },
    }
}

fn quantity(amount: Decimal, unit: Unit) -> String {
    format!("{} {unit}", amount.normalize())
}

fn optional_money(amount: Option<Decimal>, currency: &'static Currency) -> String {
    amount.map_or_else(|| "-".to_string(), |amount| money(amount, currency))
}

/// Formats a decimal amount in the catalog currency, rounded to minor units.
fn money(amount: Decimal, currency: &'static Currency) -> String {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_i64())
        .map_or_else(
            || format!("{amount} {}", currency.iso_alpha_code),
            |minor| Money::from_minor(minor, currency).to_string(),
        )
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    ((percentage * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(2)
}

fn write_sheet_table(out: &mut impl io::Write, rows: &[SheetRow]) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Component", "Amount", "Unit Cost", "Line Cost"]);

    for row in rows {
        builder.push_record([
            row.component.as_str(),
            row.amount.as_str(),
            row.unit_cost.as_str(),
            row.line_cost.as_str(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    for (index, row) in rows.iter().enumerate() {
        if row.unavailable {
            table.modify((index + 1, 3), Color::FG_YELLOW);
        }
    }

    let table_str = terminal::dim_borders(&table.to_string());

    writeln!(out, "{table_str}").map_err(|_err| ReportError::IO)
}

fn write_sheet_summary(out: &mut impl io::Write, summary: &Summary) -> Result<(), ReportError> {
    let lines: SmallVec<[(String, String); 8]> = match summary {
        Summary::Recipe {
            total,
            yield_amount,
            per_unit,
        } => smallvec![
            (terminal::bold("Total:"), terminal::bold(total)),
            ("Yield:".to_string(), yield_amount.clone()),
            ("Per unit:".to_string(), per_unit.clone()),
        ],
        Summary::Dish {
            ingredient_cost,
            multiplier,
            total,
            target_price,
            over_target,
            menu_price,
            food_cost,
        } => smallvec![
            ("Ingredient cost:".to_string(), ingredient_cost.clone()),
            ("Multiplier:".to_string(), format!("x{}", multiplier.normalize())),
            (terminal::bold("Total:"), terminal::bold(total)),
            ("Target price:".to_string(), target_price.clone()),
            ("Over target:".to_string(), over_target_cell(*over_target)),
            ("Menu price:".to_string(), menu_price.clone()),
            ("Food cost:".to_string(), food_cost.clone()),
        ],
    };

    terminal::write_columns(out, &lines).map_err(|_err| ReportError::IO)?;

    writeln!(out).map_err(|_err| ReportError::IO)
}

fn over_target_cell(over_target: Option<bool>) -> String {
    match over_target {
        Some(true) => terminal::red("yes"),
        Some(false) => terminal::green("no"),
        None => "N/A".to_string(),
    }
}
