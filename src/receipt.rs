//! Receipt
//!
//! Display-side summary of a cart: one row per line item plus subtotal,
//! total and savings. Rendering is a read-only projection; nothing here
//! feeds back into store state. Currency enters the picture only at this
//! boundary, for formatting.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{Table, Tabled, settings::Style};

use crate::{cart::CartStore, storage::Storage, variants::effective_base_price};

/// One rendered cart line.
#[derive(Debug, Tabled)]
pub struct ReceiptRow {
    /// Product name
    #[tabled(rename = "Item")]
    pub name: String,

    /// Selected size label, or `-` for unsized products
    #[tabled(rename = "Size")]
    pub size: String,

    /// Quantity in cart
    #[tabled(rename = "Qty")]
    pub quantity: u32,

    /// Formatted effective unit price
    #[tabled(rename = "Unit")]
    pub unit_price: String,

    /// Formatted line total
    #[tabled(rename = "Total")]
    pub line_total: String,
}

/// Summary of a cart at a point in time.
#[derive(Debug)]
pub struct CartReceipt {
    rows: Vec<ReceiptRow>,
    subtotal: Decimal,
    total: Decimal,
    currency: &'static Currency,
}

impl CartReceipt {
    /// Build a receipt from the cart's current lines.
    pub fn from_cart<S: Storage>(cart: &CartStore<S>, currency: &'static Currency) -> Self {
        let mut subtotal = Decimal::ZERO;
        let mut rows = Vec::with_capacity(cart.len());

        for line in cart.lines() {
            let quantity = Decimal::from(line.quantity());
            subtotal += effective_base_price(line.product(), line.size()) * quantity;

            rows.push(ReceiptRow {
                name: line.product().name.clone(),
                size: line.size().map_or_else(|| "-".to_owned(), |s| s.label().to_owned()),
                quantity: line.quantity(),
                unit_price: format_amount(line.unit_price(), currency),
                line_total: format_amount(line.line_total(), currency),
            });
        }

        Self {
            rows,
            subtotal,
            total: cart.total(),
            currency,
        }
    }

    /// The rendered rows, one per cart line.
    #[must_use]
    pub fn rows(&self) -> &[ReceiptRow] {
        &self.rows
    }

    /// Total before offer discounts (size overrides applied).
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Total actually charged.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Amount saved through offer discounts.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.subtotal - self.total
    }

    /// Render the line items as a table.
    #[must_use]
    pub fn to_table(&self) -> String {
        let mut table = Table::new(&self.rows);
        table.with(Style::rounded());

        table.to_string()
    }

    /// Write the table plus the subtotal/savings/total footer.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the writer fails.
    pub fn write_to(&self, writer: &mut impl io::Write) -> io::Result<()> {
        writeln!(writer, "{}", self.to_table())?;
        writeln!(
            writer,
            "Subtotal: {}",
            format_amount(self.subtotal, self.currency)
        )?;
        writeln!(
            writer,
            "Savings:  {}",
            format_amount(self.savings(), self.currency)
        )?;
        writeln!(
            writer,
            "Total:    {}",
            format_amount(self.total, self.currency)
        )
    }
}

/// Format a decimal amount in the receipt's currency.
fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
