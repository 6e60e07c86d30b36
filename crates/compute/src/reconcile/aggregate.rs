use formats::TaxRecord;

use crate::analysis::mean_present;

/// Mean of the present fields of `record`; `None` when all three are absent.
/// Absent fields count toward neither the sum nor the divisor.
pub fn aggregate(record: &TaxRecord) -> Option<f64> {
    mean_present(record.fields())
}

pub fn aggregate_rates(
    corporate_tax: Option<f64>,
    income_tax: Option<f64>,
    vat: Option<f64>,
) -> Option<f64> {
    aggregate(&TaxRecord::new(corporate_tax, income_tax, vat))
}
