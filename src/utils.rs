//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the cost sheet demo
#[derive(Debug, Parser)]
pub struct CostSheetArgs {
    /// Directory holding the `catalog/` fixture files
    #[clap(long, env = "PLATED_FIXTURES", default_value = "./fixtures")]
    pub fixtures: PathBuf,

    /// Fixture set to cost
    #[clap(short, long, default_value = "kitchen")]
    pub set: String,

    /// Only print the sheet for this dish key
    #[clap(short, long, conflicts_with = "recipe")]
    pub dish: Option<String>,

    /// Only print the sheet for this recipe key
    #[clap(short, long)]
    pub recipe: Option<String>,
}
