//! Deliveries

use rust_decimal::Decimal;
use slotmap::new_key_type;

use crate::{
    catalog::{ingredients::IngredientKey, suppliers::SupplierKey},
    units::Unit,
};

new_key_type! {
    /// Delivery Key
    pub struct DeliveryKey;
}

/// What was paid for a delivered quantity of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPrice {
    /// Price paid for the whole delivery
    pub total_price: Decimal,

    /// Quantity delivered, in `unit`
    pub total_amount: Decimal,

    /// Unit the delivery was priced in
    pub unit: Unit,
}

impl DeliveryPrice {
    /// Creates a new delivery price.
    pub fn new(total_price: Decimal, total_amount: Decimal, unit: Unit) -> Self {
        Self {
            total_price,
            total_amount,
            unit,
        }
    }

    /// Price of a single `unit`, or `None` when nothing was delivered.
    pub fn price_per_unit(&self) -> Option<Decimal> {
        self.total_price.checked_div(self.total_amount)
    }
}

/// A purchase of an ingredient, optionally from a known supplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Ingredient that was delivered
    pub ingredient: IngredientKey,

    /// Supplier that delivered it
    pub supplier: Option<SupplierKey>,

    /// What was paid
    pub price: DeliveryPrice,
}

impl Delivery {
    /// Creates a delivery without a recorded supplier.
    pub fn new(ingredient: IngredientKey, price: DeliveryPrice) -> Self {
        Self {
            ingredient,
            supplier: None,
            price,
        }
    }

    /// Records the supplier of this delivery.
    #[must_use]
    pub fn from_supplier(mut self, supplier: SupplierKey) -> Self {
        self.supplier = Some(supplier);
        self
    }
}
