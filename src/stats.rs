//! Numeric aggregation over timing samples.
//!
//! All helpers return `None` on empty input rather than erroring; callers
//! decide whether missing data is fatal.

use serde::{Deserialize, Serialize};

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation (denominator = n, not n - 1).
pub fn population_std_dev(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    let var = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / samples.len() as f64;
    Some(var.sqrt())
}

/// Five-number summary for box plots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Sorted-index quartiles (n/4, n/2, 3n/4).
pub fn distribution(samples: &[f64]) -> Option<Distribution> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    Some(Distribution {
        min: sorted[0],
        p25: sorted[n / 4],
        median: sorted[n / 2],
        p75: sorted[3 * n / 4],
        max: sorted[n - 1],
    })
}

/// Derived statistics for one configuration.
///
/// `speedup` is present only when both the baseline and this average are
/// non-zero; `efficiency` additionally needs a worker count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub average: f64,
    pub std_dev: f64,
    pub speedup: Option<f64>,
    pub efficiency: Option<f64>,
}

/// Build a `SummaryRow` from raw samples.
///
/// `baseline_avg` is the reference configuration's average; `workers` is the
/// thread count when the configuration key encodes one.
pub fn summarize(
    samples: &[f64],
    baseline_avg: Option<f64>,
    workers: Option<u32>,
) -> Option<SummaryRow> {
    let average = mean(samples)?;
    let std_dev = population_std_dev(samples)?;
    let speedup = match baseline_avg {
        Some(b) if b > 0.0 && average > 0.0 => Some(b / average),
        _ => None,
    };
    let efficiency = match (speedup, workers) {
        (Some(sp), Some(w)) if w >= 1 => Some(sp / w as f64 * 100.0),
        _ => None,
    };
    Some(SummaryRow {
        average,
        std_dev,
        speedup,
        efficiency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn single_sample_has_zero_std_dev() {
        assert_eq!(population_std_dev(&[3.5]), Some(0.0));
    }

    #[test]
    fn population_std_dev_uses_n_denominator() {
        // mean 2.0, deviations ±1.0 -> population std 1.0 (sample std would be sqrt(2))
        let std = population_std_dev(&[1.0, 3.0]).unwrap();
        assert!((std - 1.0).abs() < 1e-12);
    }

    #[test]
    fn baseline_speedup_against_itself_is_one() {
        let samples = [2.0, 2.2, 1.8];
        let avg = mean(&samples).unwrap();
        let row = summarize(&samples, Some(avg), None).unwrap();
        assert!((row.speedup.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn efficiency_at_one_thread_is_hundred_percent() {
        let samples = [4.0, 4.0];
        let row = summarize(&samples, Some(4.0), Some(1)).unwrap();
        assert!((row.efficiency.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn efficiency_divides_speedup_by_workers() {
        // seq avg 8.0, avg 2.0 on 4 threads -> speedup 4.0, efficiency 100%
        let row = summarize(&[2.0], Some(8.0), Some(4)).unwrap();
        assert!((row.speedup.unwrap() - 4.0).abs() < 1e-12);
        assert!((row.efficiency.unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn speedup_omitted_without_usable_baseline() {
        assert_eq!(summarize(&[2.0], None, None).unwrap().speedup, None);
        assert_eq!(summarize(&[2.0], Some(0.0), None).unwrap().speedup, None);
        // zero measured average cannot produce a quotient either
        assert_eq!(summarize(&[0.0], Some(1.0), None).unwrap().speedup, None);
    }

    #[test]
    fn efficiency_omitted_without_worker_count() {
        let row = summarize(&[2.0], Some(4.0), None).unwrap();
        assert!(row.speedup.is_some());
        assert_eq!(row.efficiency, None);
    }

    #[test]
    fn distribution_is_ordered() {
        let d = distribution(&[5.0, 1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_eq!(d.min, 1.0);
        assert_eq!(d.max, 5.0);
        assert!(d.min <= d.p25 && d.p25 <= d.median);
        assert!(d.median <= d.p75 && d.p75 <= d.max);
    }

    #[test]
    fn distribution_of_single_sample_collapses() {
        let d = distribution(&[2.5]).unwrap();
        assert_eq!(d.min, 2.5);
        assert_eq!(d.p25, 2.5);
        assert_eq!(d.median, 2.5);
        assert_eq!(d.p75, 2.5);
        assert_eq!(d.max, 2.5);
    }
}
