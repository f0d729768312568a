//! Cost values

use std::fmt;

use rust_decimal::Decimal;

use crate::{catalog::ComponentRef, units::Unit};

/// Why a cost could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The ingredient has no selected delivery price.
    NoPriceSelected,

    /// The ingredient is priced per piece, used by weight, and has no piece weight.
    MissingPieceWeight,

    /// The selected price's unit cannot be converted to the unit the ingredient is used in.
    IncompatibleUnits {
        /// Unit the ingredient is consumed in
        requested: Unit,

        /// Unit the selected delivery was priced in
        priced: Unit,
    },

    /// The delivered amount or piece weight is zero.
    ZeroQuantity,

    /// The recipe yields nothing, so it has no per-unit cost.
    ZeroYield,
}

impl UnavailableReason {
    /// Short prompt telling the user how to make the cost available.
    pub fn prompt(self) -> &'static str {
        match self {
            UnavailableReason::NoPriceSelected => "select a delivery price",
            UnavailableReason::MissingPieceWeight => "add a piece weight",
            UnavailableReason::IncompatibleUnits { .. } => "price in a compatible unit",
            UnavailableReason::ZeroQuantity => "record a non-zero quantity",
            UnavailableReason::ZeroYield => "set a non-zero yield",
        }
    }
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NoPriceSelected => f.write_str("no delivery price selected"),
            UnavailableReason::MissingPieceWeight => f.write_str("no piece weight to convert with"),
            UnavailableReason::IncompatibleUnits { requested, priced } => {
                write!(f, "priced per {priced}, used per {requested}")
            }
            UnavailableReason::ZeroQuantity => f.write_str("zero quantity"),
            UnavailableReason::ZeroYield => f.write_str("zero yield"),
        }
    }
}

/// A cost that could not be determined, and where that was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unavailable {
    /// The ingredient or recipe whose cost is missing
    pub item: ComponentRef,

    /// Why it is missing
    pub reason: UnavailableReason,
}

/// Result of costing an ingredient, recipe or dish.
///
/// Missing prices are an expected business state, so they are carried as a value
/// rather than an error. Arithmetic on an unavailable cost stays unavailable and
/// keeps the first reason encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cost {
    /// A known cost
    Priced(Decimal),

    /// A cost that cannot be determined
    Unavailable(Unavailable),
}

impl Cost {
    /// Zero cost, the identity for addition.
    pub const ZERO: Cost = Cost::Priced(Decimal::ZERO);

    pub(crate) fn unavailable(item: ComponentRef, reason: UnavailableReason) -> Self {
        Cost::Unavailable(Unavailable { item, reason })
    }

    /// The amount, if the cost is known.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Cost::Priced(amount) => Some(*amount),
            Cost::Unavailable(_) => None,
        }
    }

    /// Details of the missing cost, if it is unavailable.
    pub fn unavailability(&self) -> Option<&Unavailable> {
        match self {
            Cost::Priced(_) => None,
            Cost::Unavailable(unavailable) => Some(unavailable),
        }
    }

    /// Returns true if the cost is known.
    pub fn is_available(&self) -> bool {
        matches!(self, Cost::Priced(_))
    }

    /// Multiply by a quantity or markup factor.
    ///
    /// `None` if the product overflows.
    #[must_use]
    pub fn checked_scale(self, factor: Decimal) -> Option<Cost> {
        match self {
            Cost::Priced(amount) => amount.checked_mul(factor).map(Cost::Priced),
            unavailable @ Cost::Unavailable(_) => Some(unavailable),
        }
    }

    /// Divide by `divisor`, becoming `on_zero` when the divisor is zero.
    ///
    /// `None` if the quotient overflows.
    #[must_use]
    pub fn checked_divide(self, divisor: Decimal, on_zero: Unavailable) -> Option<Cost> {
        match self {
            Cost::Priced(_) if divisor.is_zero() => Some(Cost::Unavailable(on_zero)),
            Cost::Priced(amount) => amount.checked_div(divisor).map(Cost::Priced),
            unavailable @ Cost::Unavailable(_) => Some(unavailable),
        }
    }

    /// Add two costs. The left-hand reason wins when both are unavailable.
    ///
    /// `None` if the sum overflows.
    #[must_use]
    pub fn checked_add(self, other: Cost) -> Option<Cost> {
        match (self, other) {
            (Cost::Priced(a), Cost::Priced(b)) => a.checked_add(b).map(Cost::Priced),
            (Cost::Unavailable(u), _) | (Cost::Priced(_), Cost::Unavailable(u)) => {
                Some(Cost::Unavailable(u))
            }
        }
    }
}

impl From<Decimal> for Cost {
    fn from(amount: Decimal) -> Self {
        Cost::Priced(amount)
    }
}
