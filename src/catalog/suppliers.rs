//! Suppliers

use slotmap::new_key_type;

new_key_type! {
    /// Supplier Key
    pub struct SupplierKey;
}

/// A supplier ingredients are delivered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    /// Supplier name
    pub name: String,
}

impl Supplier {
    /// Creates a new supplier with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
