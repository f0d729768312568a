//! Plated prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        Catalog, CatalogError, Component, ComponentRef, Delivery, DeliveryKey, DeliveryPrice,
        Dish, DishKey, Ingredient, IngredientKey, Recipe, RecipeKey, Supplier, SupplierKey,
    },
    costing::{
        Cost, CostAggregator, CostBreakdown, CostError, CostLine, DishCosting,
        IngredientReference, Unavailable, UnavailableReason,
    },
    fixtures::{Fixture, FixtureError},
    report::{CostSheet, ReportError},
    units::{Measure, Unit, UnitError},
};
