use formats::TrendRecord;
use serde::Serialize;

use crate::analysis::max_value;

/// Rate ceiling used when a series has no positive maximum.
const DEFAULT_RATE_CEILING: f64 = 100.0;

/// Trend observations selected for one country, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub country: String,
    pub points: Vec<TrendRecord>,
}

impl TrendSeries {
    /// Selects records whose country contains, or is contained in, `country`,
    /// ignoring case. An empty `country` selects nothing.
    pub fn select(country: &str, records: &[TrendRecord]) -> Self {
        let wanted = country.to_lowercase();
        let points = if wanted.is_empty() {
            Vec::new()
        } else {
            records
                .iter()
                .filter(|r| {
                    let have = r.country.to_lowercase();
                    have.contains(&wanted) || wanted.contains(&have)
                })
                .cloned()
                .collect()
        };
        Self {
            country: country.to_string(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last year covered, for the chart's x axis.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let first = self.points.first()?.year;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.year), hi.max(p.year))
        }))
    }

    /// `[0, max rate]` for the chart's y axis; the ceiling is 100 when there
    /// are no points or the maximum is zero.
    pub fn rate_domain(&self) -> (f64, f64) {
        match max_value(self.points.iter().map(|p| p.rate)) {
            Some(max) if max != 0.0 => (0.0, max),
            _ => (0.0, DEFAULT_RATE_CEILING),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TrendSeries;
    use formats::TrendRecord;

    fn rec(country: &str, year: i32, rate: f64) -> TrendRecord {
        TrendRecord {
            country: country.to_string(),
            year,
            rate,
        }
    }

    fn records() -> Vec<TrendRecord> {
        vec![
            rec("United States", 2019, 21.0),
            rec("United States", 2020, 21.0),
            rec("Korea, Republic of", 2020, 25.0),
            rec("Niger", 2018, 30.0),
            rec("Nigeria", 2018, 30.0),
            rec("Nigeria", 2021, 32.0),
        ]
    }

    #[test]
    fn selects_by_case_insensitive_containment() {
        let s = TrendSeries::select("united states", &records());
        assert_eq!(s.points.len(), 2);
        let s = TrendSeries::select("Korea", &records());
        assert_eq!(s.points, vec![rec("Korea, Republic of", 2020, 25.0)]);
    }

    #[test]
    fn containment_runs_both_ways() {
        let s = TrendSeries::select("Nigeria", &records());
        let names: Vec<&str> = s.points.iter().map(|p| p.country.as_str()).collect();
        assert_eq!(names, vec!["Niger", "Nigeria", "Nigeria"]);
    }

    #[test]
    fn empty_name_selects_nothing() {
        assert!(TrendSeries::select("", &records()).is_empty());
    }

    #[test]
    fn chart_domain() {
        let s = TrendSeries::select("Nigeria", &records());
        assert_eq!(s.year_extent(), Some((2018, 2021)));
        assert_eq!(s.rate_domain(), (0.0, 32.0));

        let empty = TrendSeries::select("Atlantis", &records());
        assert_eq!(empty.year_extent(), None);
        assert_eq!(empty.rate_domain(), (0.0, 100.0));

        let zeros = TrendSeries::select("Bahamas", &[rec("Bahamas", 2020, 0.0)]);
        assert_eq!(zeros.rate_domain(), (0.0, 100.0));
    }
}
