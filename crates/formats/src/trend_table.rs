use serde::{Deserialize, Serialize};

use crate::numeric::parse_decimal;
use crate::tabular::Table;

/// One yearly observation. `country` is kept exactly as written in the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub country: String,
    pub year: i32,
    pub rate: f64,
}

/// Reads a wide trend table: one row per country and one column per year.
///
/// The country comes from a `country` column, falling back to `Country`.
/// Only headers made of exactly four ASCII digits are years; a repeated year
/// header is read once, from its first column. Cells that do not parse are
/// omitted rather than recorded as absent. Within a row, records are emitted
/// in ascending year order.
pub fn parse_trend_records(text: &str) -> Vec<TrendRecord> {
    let table = Table::parse(text);
    let lower = table.column("country");
    let upper = table.column("Country");

    let mut years: Vec<(i32, usize)> = Vec::new();
    for (index, header) in table.headers().iter().enumerate() {
        let Some(year) = year_header(header) else {
            continue;
        };
        if years.iter().all(|&(y, _)| y != year) {
            years.push((year, index));
        }
    }
    years.sort_by_key(|&(year, _)| year);

    let mut out = Vec::new();
    for row in table.rows() {
        let country = row
            .get(lower)
            .filter(|s| !s.is_empty())
            .or_else(|| row.get(upper).filter(|s| !s.is_empty()));
        let Some(country) = country else {
            continue;
        };
        for &(year, column) in &years {
            if let Some(rate) = row.get(Some(column)).and_then(parse_decimal) {
                out.push(TrendRecord {
                    country: country.to_string(),
                    year,
                    rate,
                });
            }
        }
    }
    out
}

fn year_header(header: &str) -> Option<i32> {
    if header.len() == 4 && header.bytes().all(|b| b.is_ascii_digit()) {
        header.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{TrendRecord, parse_trend_records};
    use pretty_assertions::assert_eq;

    fn rec(country: &str, year: i32, rate: f64) -> TrendRecord {
        TrendRecord {
            country: country.to_string(),
            year,
            rate,
        }
    }

    #[test]
    fn one_record_per_numeric_year_cell() {
        let text = "country,iso,2019,2020,2021\nHungary,HU,9,9,N/A\nChad,TD,35,,35\n";
        assert_eq!(
            parse_trend_records(text),
            vec![
                rec("Hungary", 2019, 9.0),
                rec("Hungary", 2020, 9.0),
                rec("Chad", 2019, 35.0),
                rec("Chad", 2021, 35.0),
            ]
        );
    }

    #[test]
    fn only_four_digit_headers_are_years() {
        let text = "Country,199,20201,FY2020, 2020,2020\nPeru,1,2,3,4,29.5\n";
        assert_eq!(parse_trend_records(text), vec![rec("Peru", 2020, 29.5)]);
    }

    #[test]
    fn years_come_out_ascending_within_a_row() {
        let text = "Country,2021,2019,2020\nChile,27,25,26\n";
        let years: Vec<i32> = parse_trend_records(text).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn country_name_is_not_normalized() {
        let text = "Country,2020\nCôte d'Ivoire (Ivory Coast),25\n";
        assert_eq!(parse_trend_records(text)[0].country, "Côte d'Ivoire (Ivory Coast)");
    }

    #[test]
    fn lowercase_country_column_wins_and_falls_back() {
        let text = "country,Country,2020\nSlovakia,Slovak Republic,21\n,Czechia,19\n,,50\n";
        assert_eq!(
            parse_trend_records(text),
            vec![rec("Slovakia", 2020, 21.0), rec("Czechia", 2020, 19.0)]
        );
    }

    #[test]
    fn uppercase_country_column_alone() {
        let text = "Country,2020\nNorway,22\n";
        assert_eq!(parse_trend_records(text), vec![rec("Norway", 2020, 22.0)]);
    }

    #[test]
    fn missing_inputs_are_empty() {
        assert!(parse_trend_records("").is_empty());
        assert!(parse_trend_records("Country,Rate\nChad,35\n").is_empty());
    }
}
