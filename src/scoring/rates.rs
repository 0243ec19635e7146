// Precision / recall / F1 from confusion counts

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    /// tp / (tp + fn), 0 when there is nothing to recall
    pub recall: f64,

    /// tp / (tp + fp), 0 when nothing was predicted
    pub precision: f64,

    /// Harmonic mean of precision and recall, 0 when both are 0
    pub f1: f64,
}

/// Compute rates; every zero denominator yields 0 instead of NaN
pub fn compute_rates(true_pos: usize, false_pos: usize, false_neg: usize) -> Rates {
    let recall = ratio(true_pos, true_pos + false_neg);
    let precision = ratio(true_pos, true_pos + false_pos);
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    Rates {
        recall,
        precision,
        f1,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_counts() {
        assert_eq!(compute_rates(0, 0, 0), Rates::default());
    }

    #[test]
    fn test_perfect_rates() {
        let rates = compute_rates(7, 0, 0);
        assert_eq!(rates.recall, 1.0);
        assert_eq!(rates.precision, 1.0);
        assert_eq!(rates.f1, 1.0);
    }

    #[test]
    fn test_mixed_rates() {
        let rates = compute_rates(2, 2, 6);
        assert!((rates.recall - 0.25).abs() < 1e-12);
        assert!((rates.precision - 0.5).abs() < 1e-12);
        assert!((rates.f1 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_true_positives() {
        let rates = compute_rates(0, 3, 4);
        assert_eq!(rates, Rates::default());
    }

    #[test]
    fn test_rates_stay_in_unit_interval() {
        for tp in 0..6 {
            for fp in 0..6 {
                for fn_ in 0..6 {
                    let r = compute_rates(tp, fp, fn_);
                    for value in [r.recall, r.precision, r.f1] {
                        assert!((0.0..=1.0).contains(&value), "{tp} {fp} {fn_}: {value}");
                    }
                }
            }
        }
    }
}
