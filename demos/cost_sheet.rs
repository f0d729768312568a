//! Cost Sheet Example
//!
//! Prints cost sheets for the dishes of a fixture set.
//!
//! Use `-s` to load a fixture set by name
//! Use `-d` to print a single dish, or `-r` to print a single recipe
//! Set `RUST_LOG=plated=debug` to trace the calculation

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::{EnvFilter, fmt};

use plated::{fixtures::Fixture, report::CostSheet, utils::CostSheetArgs};

/// Cost Sheet Example
pub fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(io::stderr)
        .init();

    let args = CostSheetArgs::parse();

    let mut fixture = Fixture::with_base_path(&args.fixtures);

    fixture.load_catalog(&args.set)?;

    let aggregator = fixture.aggregator()?;

    let start = Instant::now();

    let sheets = if let Some(recipe) = args.recipe.as_deref() {
        vec![CostSheet::for_recipe(aggregator, fixture.recipe_key(recipe)?)?]
    } else if let Some(dish) = args.dish.as_deref() {
        vec![CostSheet::for_dish(aggregator, fixture.dish_key(dish)?)?]
    } else {
        fixture
            .dish_keys()
            .into_iter()
            .map(|(_, dish)| CostSheet::for_dish(aggregator, dish))
            .collect::<Result<Vec<_>, _>>()?
    };

    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for sheet in &sheets {
        sheet.write_to(&mut handle)?;
    }

    writeln!(
        handle,
        " {} sheet(s) costed in {} ({}s)",
        sheets.len(),
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
