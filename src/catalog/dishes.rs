//! Dishes

use rust_decimal::Decimal;
use slotmap::new_key_type;

use crate::catalog::components::{Component, Components};

new_key_type! {
    /// Dish Key
    pub struct DishKey;
}

/// A dish on the menu.
///
/// Dishes consume ingredients and recipes but are never consumed themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    /// Dish name
    pub name: String,

    /// Markup applied to the summed component cost
    pub multiplier: Decimal,

    /// Price the marked-up cost should not exceed
    pub target_price: Option<Decimal>,

    /// Price the dish is sold at
    pub menu_price: Option<Decimal>,

    pub(crate) components: Components,
}

impl Dish {
    /// Creates a dish with no components and no prices.
    pub fn new(name: impl Into<String>, multiplier: Decimal) -> Self {
        Self {
            name: name.into(),
            multiplier,
            target_price: None,
            menu_price: None,
            components: Components::new(),
        }
    }

    /// Sets the components of the dish.
    #[must_use]
    pub fn with_components(mut self, components: impl IntoIterator<Item = Component>) -> Self {
        self.components = components.into_iter().collect();
        self
    }

    /// Sets the target price.
    #[must_use]
    pub fn with_target_price(mut self, target_price: Decimal) -> Self {
        self.target_price = Some(target_price);
        self
    }

    /// Sets the menu price.
    #[must_use]
    pub fn with_menu_price(mut self, menu_price: Decimal) -> Self {
        self.menu_price = Some(menu_price);
        self
    }

    /// Components in the order they were listed.
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}
