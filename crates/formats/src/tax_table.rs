use serde::{Deserialize, Serialize};

use crate::numeric::parse_decimal;
use crate::tabular::Table;

pub const COUNTRY_COLUMN: &str = "Country";
pub const INCOME_TAX_COLUMN: &str = "Personal Income Tax Rate (%)";
pub const CORPORATE_TAX_COLUMN: &str = "Corporate Tax Rate (%)";
pub const SALES_TAX_COLUMN: &str = "Sales Tax Rate (%)";

/// The curated per-country rate table shipped with the crate.
pub const BUNDLED_TAX_RATES: &str = include_str!("../assets/tax_rates.csv");

/// Headline rates for one country, in percent. `None` means the source had no
/// number for that field, which is different from a 0% rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecord {
    pub corporate_tax: Option<f64>,
    pub income_tax: Option<f64>,
    pub vat: Option<f64>,
}

impl TaxRecord {
    pub const ABSENT: TaxRecord = TaxRecord {
        corporate_tax: None,
        income_tax: None,
        vat: None,
    };

    pub fn new(corporate_tax: Option<f64>, income_tax: Option<f64>, vat: Option<f64>) -> Self {
        Self {
            corporate_tax,
            income_tax,
            vat,
        }
    }

    /// Fields in aggregation order: corporate, income, sales.
    pub fn fields(&self) -> [Option<f64>; 3] {
        [self.corporate_tax, self.income_tax, self.vat]
    }
}

/// One data row of the rate table with its country name as written.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxRow {
    pub country: String,
    pub record: TaxRecord,
}

/// Reads the rate table. Rows with an empty country cell are dropped; numeric
/// cells that do not parse become absent.
pub fn parse_tax_rows(text: &str) -> Vec<TaxRow> {
    let table = Table::parse(text);
    let country = table.column(COUNTRY_COLUMN);
    if country.is_none() {
        return Vec::new();
    }
    let corporate = table.column(CORPORATE_TAX_COLUMN);
    let income = table.column(INCOME_TAX_COLUMN);
    let sales = table.column(SALES_TAX_COLUMN);

    table
        .rows()
        .filter_map(|row| {
            let name = row.get(country).filter(|s| !s.is_empty())?;
            let rate = |col| row.get(col).and_then(parse_decimal);
            Some(TaxRow {
                country: name.to_string(),
                record: TaxRecord::new(rate(corporate), rate(income), rate(sales)),
            })
        })
        .collect()
}
