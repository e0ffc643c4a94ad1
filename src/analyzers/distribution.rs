use crate::utils::constants::OUTLIER_IQR_FACTOR;
use serde::Serialize;

/// Five-number summary of rental counts with Tukey fences, the numbers
/// behind one box of a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Smallest value not below `lower_fence`
    pub whisker_low: f64,
    /// Largest value not above `upper_fence`
    pub whisker_high: f64,
    pub outliers: usize,
}

impl BoxStats {
    /// Returns `None` for an empty group.
    pub fn from_counts(counts: &[u32]) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }

        let mut sorted: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - OUTLIER_IQR_FACTOR * iqr;
        let upper_fence = q3 + OUTLIER_IQR_FACTOR * iqr;

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| (lower_fence..=upper_fence).contains(v));
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .filter(|v| !(lower_fence..=upper_fence).contains(*v))
            .count();

        Some(Self {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            iqr,
            lower_fence,
            upper_fence,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Quantile of sorted data by linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let h = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let lower = h.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            sorted[lower] + (h - lower as f64) * (sorted[upper] - sorted[lower])
        }
    }
}
