use serde::Serialize;

use crate::symbology::{BREAKPOINTS, BUCKET_COLORS, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// One entry per bucket, labelled from the same breakpoints that drive
/// [`crate::classify`].
pub fn legend() -> Vec<LegendEntry> {
    BUCKET_COLORS
        .iter()
        .enumerate()
        .map(|(i, &color)| LegendEntry {
            label: legend_label(i),
            color,
        })
        .collect()
}

fn legend_label(i: usize) -> String {
    let last = BUCKET_COLORS.len() - 1;
    match i {
        0 => format!("< {}", BREAKPOINTS[0]),
        _ if i == last => format!("> {}", BREAKPOINTS[i - 1]),
        _ => format!("{}–{}", BREAKPOINTS[i - 1], BREAKPOINTS[i]),
    }
}

#[cfg(test)]
mod tests {
    use super::legend;
    use crate::symbology::BUCKET_COLORS;

    #[test]
    fn labels_follow_breakpoints() {
        let labels: Vec<String> = legend().into_iter().map(|e| e.label).collect();
        assert_eq!(
            labels,
            vec!["< 10", "10–15", "15–20", "20–25", "25–30", "30–35", "> 35"]
        );
    }

    #[test]
    fn colors_match_buckets() {
        let colors: Vec<_> = legend().into_iter().map(|e| e.color).collect();
        assert_eq!(colors, BUCKET_COLORS.to_vec());
    }
}
