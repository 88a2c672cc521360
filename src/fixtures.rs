//! Fixtures
//!
//! YAML-defined product catalogs used by the demos and integration tests as
//! a stand-in for the external product-catalog collaborator. Prices are
//! written as `"49.00 USD"` strings and every product in a set must use the
//! same currency.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{ProductId, ProductSnapshot, Size, SizeVariant};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch within a catalog set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Wrapper for a catalog set in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: FxHashMap<String, ProductFixture>,
}

/// One product as written in a fixture file.
#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: u64,
    name: String,
    #[serde(default)]
    image: Option<String>,
    /// Price string, e.g. `"49.00 USD"`
    price: String,
    #[serde(default)]
    on_offer: bool,
    #[serde(default)]
    variants: Vec<VariantFixture>,
}

/// One size variant as written in a fixture file.
#[derive(Debug, Deserialize)]
struct VariantFixture {
    size: Size,
    quantity: u32,
    /// Optional price override, same format as the product price
    #[serde(default)]
    price: Option<String>,
}

/// A loaded catalog set.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<ProductSnapshot>,
    keys: FxHashMap<String, usize>,
    currency: Option<&'static Currency>,
}

impl Catalog {
    /// Load the catalog set `name` from `./fixtures/catalog/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the file cannot be read or parsed, a
    /// price string is invalid, or the set mixes currencies.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let path = PathBuf::from("fixtures")
            .join("catalog")
            .join(format!("{name}.yml"));
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog set from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the YAML cannot be parsed, a price
    /// string is invalid, or the set mixes currencies.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut entries: Vec<(String, ProductFixture)> = fixture.products.into_iter().collect();
        entries.sort_by_key(|(_, product)| product.id);

        let mut catalog = Catalog {
            products: Vec::with_capacity(entries.len()),
            keys: FxHashMap::default(),
            currency: None,
        };

        for (key, product_fixture) in entries {
            let product = catalog.build_product(product_fixture)?;

            catalog.keys.insert(key, catalog.products.len());
            catalog.products.push(product);
        }

        Ok(catalog)
    }

    /// Look up a product by its fixture key.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] for an unknown key.
    pub fn product(&self, key: &str) -> Result<&ProductSnapshot, FixtureError> {
        self.keys
            .get(key)
            .and_then(|idx| self.products.get(*idx))
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_owned()))
    }

    /// All products in the set, ordered by catalog id.
    #[must_use]
    pub fn products(&self) -> &[ProductSnapshot] {
        &self.products
    }

    /// The currency shared by every price in the set; `None` for an empty
    /// set.
    #[must_use]
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    fn build_product(&mut self, fixture: ProductFixture) -> Result<ProductSnapshot, FixtureError> {
        let price = self.parse_in_set_currency(&fixture.price)?;

        let mut variants = SmallVec::new();
        for variant in fixture.variants {
            let price = variant
                .price
                .as_deref()
                .map(|p| self.parse_in_set_currency(p))
                .transpose()?;

            variants.push(SizeVariant {
                size: variant.size,
                quantity: variant.quantity,
                price,
            });
        }

        Ok(ProductSnapshot {
            id: ProductId(fixture.id),
            name: fixture.name,
            image: fixture.image,
            price,
            on_offer: fixture.on_offer,
            variants,
        })
    }

    /// Parse a price string and enforce currency consistency across the set.
    fn parse_in_set_currency(&mut self, s: &str) -> Result<Decimal, FixtureError> {
        let (amount, currency) = parse_price(s)?;

        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_owned(),
                currency.iso_alpha_code.to_owned(),
            )),
            Some(_) => Ok(amount),
            None => {
                self.currency = Some(currency);
                Ok(amount)
            }
        }
    }
}

/// Parse a price string (e.g., `"49.00 USD"`) into an amount and currency.
///
/// # Errors
///
/// Returns an error if the string is not in the format `"AMOUNT CURRENCY"`,
/// if the amount cannot be parsed as a decimal, or if the currency code is
/// not recognized.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_owned()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_owned()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_owned()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_owned())),
    };

    Ok((amount, currency))
}
