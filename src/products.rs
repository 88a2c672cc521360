//! Products
//!
//! The frozen product data captured into cart lines and wishlist entries.
//! A snapshot is taken at the moment an item enters a store and is never
//! refreshed from the catalog afterwards.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Catalog identifier for a product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Garment size label.
///
/// Labels are a fixed enumeration; matching against a variant list is exact,
/// with no fuzzy or case-insensitive lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Size {
    /// Extra small
    #[serde(rename = "XS")]
    Xs,
    /// Small
    S,
    /// Medium
    M,
    /// Large
    L,
    /// Extra large
    #[serde(rename = "XL")]
    Xl,
}

impl Size {
    /// Every size label, smallest first.
    pub const ALL: [Size; 5] = [Size::Xs, Size::S, Size::M, Size::L, Size::Xl];

    /// The display label for the size.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Size::Xs => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::Xl => "XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-size stock and price record belonging to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeVariant {
    /// Size label
    pub size: Size,

    /// Quantity available in this size
    pub quantity: u32,

    /// Variant-specific price override; absent means "use the base price"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// A frozen copy of the catalog fields needed for display and pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Catalog identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Image reference for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Unit base price
    pub price: Decimal,

    /// Whether the product is on offer
    pub on_offer: bool,

    /// Size variants; empty for products without sizing
    #[serde(default)]
    pub variants: SmallVec<[SizeVariant; 5]>,
}
