//! The StockItem record and its random construction.

use rand::Rng;
use std::ops::RangeInclusive;

use crate::vocab::{LABELS, STOCKROOMS, SUPPLIERS, TYPES};

/// Leaf tag names, in the order they appear inside `<item>`.
pub const FIELD_NAMES: [&str; 8] = [
    "uniquename",
    "label",
    "stockroom",
    "price",
    "new_price",
    "type",
    "commodity_code",
    "supplier",
];

pub const PRICE_RANGE: RangeInclusive<f64> = 10.0..=100.0;
pub const NEW_PRICE_RANGE: RangeInclusive<f64> = 5.0..=95.0;
pub const COMMODITY_CODE_LEN: usize = 9;

/// Width of the zero-padded index in `uniquename`.
pub const INDEX_WIDTH: usize = 6;

/// Largest index that still fits in [`INDEX_WIDTH`] digits.
pub const MAX_INDEX: u32 = 999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockItem {
    pub uniquename: String,
    pub label: String,
    pub stockroom: String,
    pub price: String,
    pub new_price: String,
    /// Serialized as `<type>`.
    pub item_type: String,
    pub commodity_code: String,
    pub supplier: String,
}

impl StockItem {
    /// Build the record for `index` with every non-identifier field drawn from `rng`.
    ///
    /// Draw order is fixed (label, stockroom, price, new_price, type,
    /// commodity_code, supplier) so a seeded RNG reproduces the same records.
    pub fn random<R: Rng>(index: u32, rng: &mut R) -> Self {
        Self {
            uniquename: unique_name(index),
            label: pick(LABELS, rng).to_string(),
            stockroom: pick(STOCKROOMS, rng).to_string(),
            price: format_price(rng.random_range(PRICE_RANGE)),
            new_price: format_price(rng.random_range(NEW_PRICE_RANGE)),
            item_type: pick(TYPES, rng).to_string(),
            commodity_code: commodity_code(rng),
            supplier: pick(SUPPLIERS, rng).to_string(),
        }
    }

    /// Field values paired with their tag names, in document order.
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("uniquename", self.uniquename.as_str()),
            ("label", self.label.as_str()),
            ("stockroom", self.stockroom.as_str()),
            ("price", self.price.as_str()),
            ("new_price", self.new_price.as_str()),
            ("type", self.item_type.as_str()),
            ("commodity_code", self.commodity_code.as_str()),
            ("supplier", self.supplier.as_str()),
        ]
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Rebuild a record from `(tag, text)` leaf pairs read back from a document.
    pub fn from_fields(fields: &[(String, String)]) -> anyhow::Result<Self> {
        let lookup = |name: &str| -> anyhow::Result<String> {
            fields
                .iter()
                .find(|(tag, _)| tag == name)
                .map(|(_, text)| text.clone())
                .ok_or_else(|| anyhow::anyhow!("missing <{}> element", name))
        };

        Ok(Self {
            uniquename: lookup("uniquename")?,
            label: lookup("label")?,
            stockroom: lookup("stockroom")?,
            price: lookup("price")?,
            new_price: lookup("new_price")?,
            item_type: lookup("type")?,
            commodity_code: lookup("commodity_code")?,
            supplier: lookup("supplier")?,
        })
    }

    /// File name this record is written under.
    pub fn file_name(&self) -> String {
        format!("{}.xml", self.uniquename)
    }
}

/// `item` followed by the index zero-padded to six digits.
pub fn unique_name(index: u32) -> String {
    format!("item{:0width$}", index, width = INDEX_WIDTH)
}

pub fn is_field_name(name: &str) -> bool {
    FIELD_NAMES.contains(&name)
}

/// Render a price with exactly two fractional digits.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value)
}

fn pick<R: Rng>(items: &[&'static str], rng: &mut R) -> &'static str {
    items[rng.random_range(0..items.len())]
}

fn commodity_code<R: Rng>(rng: &mut R) -> String {
    (0..COMMODITY_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
