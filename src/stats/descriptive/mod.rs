// Descriptive statistics kernels

use std::collections::HashMap;

use crate::stats::NumericSummary;

/// Compute count/mean/std/quartiles over present values.
///
/// With no values every field except `count` is not applicable; `std` needs at
/// least two values (sample standard deviation).
pub(crate) fn describe_impl(data: &[f64]) -> NumericSummary {
    let count = data.len();
    if count == 0 {
        return NumericSummary::empty();
    }

    let mean = data.iter().sum::<f64>() / count as f64;

    let std = if count > 1 {
        let sum_squared_diff = data.iter().map(|&x| (x - mean).powi(2)).sum::<f64>();
        Some((sum_squared_diff / (count - 1) as f64).sqrt())
    } else {
        None
    };

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    NumericSummary {
        count,
        mean: Some(mean),
        std,
        min: Some(sorted[0]),
        q1: Some(percentile(&sorted, 0.25)),
        median: Some(percentile(&sorted, 0.5)),
        q3: Some(percentile(&sorted, 0.75)),
        max: Some(sorted[count - 1]),
    }
}

/// Percentile of sorted data with linear interpolation between closest ranks
pub(crate) fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return f64::NAN;
    }

    let n = sorted_data.len();
    let idx = p * (n - 1) as f64;
    let idx_floor = idx.floor() as usize;
    let idx_ceil = idx.ceil() as usize;

    if idx_floor == idx_ceil {
        return sorted_data[idx_floor];
    }

    let weight_ceil = idx - idx_floor as f64;
    let weight_floor = 1.0 - weight_ceil;

    sorted_data[idx_floor] * weight_floor + sorted_data[idx_ceil] * weight_ceil
}

/// Pearson correlation coefficient.
///
/// `None` when the inputs differ in length, hold fewer than two points,
/// either side has zero variance, or the result is not finite (an infinite
/// input). Results are clamped to [-1, 1].
pub(crate) fn correlation_impl(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // Σ(xi - x̄)(yi - ȳ)
    let numerator = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    let sum_squared_diff_x = x.iter().map(|&xi| (xi - mean_x).powi(2)).sum::<f64>();
    let sum_squared_diff_y = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();
    if is_flat(sum_squared_diff_x, x) || is_flat(sum_squared_diff_y, y) {
        return None;
    }

    let r = numerator / (sum_squared_diff_x * sum_squared_diff_y).sqrt();
    if !r.is_finite() {
        return None;
    }
    Some(r.clamp(-1.0, 1.0))
}

/// Whether a spread of `sum_squared_diff` is rounding noise relative to the
/// magnitude of `data`
fn is_flat(sum_squared_diff: f64, data: &[f64]) -> bool {
    let sum_squares = data.iter().map(|v| v * v).sum::<f64>();
    let tolerance = (data.len() as f64 * f64::EPSILON).powi(2) * sum_squares;
    sum_squared_diff == 0.0 || sum_squared_diff <= tolerance
}

/// Keep only the rows where both sides are present
pub(crate) fn pairwise_complete(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

/// Count occurrences, most frequent first; ties keep first-appearance order
pub(crate) fn value_counts_impl<I, S>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for value in values {
        let value = value.into();
        match counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.clone(), 1);
                order.push(value);
            }
        }
    }

    let mut entries: Vec<(String, usize)> = order
        .into_iter()
        .map(|v| {
            let count = counts[&v];
            (v, count)
        })
        .collect();
    // sort_by is stable, so equal counts stay in first-seen order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = describe_impl(&data);

        assert_eq!(stats.count, 5);
        assert!((stats.mean.unwrap() - 3.0).abs() < 1e-10);
        assert!((stats.std.unwrap() - 1.5811388300841898).abs() < 1e-10);
        assert!((stats.min.unwrap() - 1.0).abs() < 1e-10);
        assert!((stats.max.unwrap() - 5.0).abs() < 1e-10);
        assert!((stats.median.unwrap() - 3.0).abs() < 1e-10);
        assert!((stats.q1.unwrap() - 2.0).abs() < 1e-10);
        assert!((stats.q3.unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_describe_interpolates_quartiles() {
        let stats = describe_impl(&[1.0, 2.0, 3.0, 4.0]);
        assert!((stats.q1.unwrap() - 1.75).abs() < 1e-10);
        assert!((stats.median.unwrap() - 2.5).abs() < 1e-10);
        assert!((stats.q3.unwrap() - 3.25).abs() < 1e-10);
    }

    #[test]
    fn test_describe_empty() {
        let stats = describe_impl(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_none());
        assert!(stats.max.is_none());
    }

    #[test]
    fn test_describe_single_value_has_no_std() {
        let stats = describe_impl(&[7.0]);
        assert_eq!(stats.mean, Some(7.0));
        assert!(stats.std.is_none());
    }

    #[test]
    fn test_correlation() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((correlation_impl(&x, &y).unwrap() - 1.0).abs() < 1e-10);

        let y_neg = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((correlation_impl(&x, &y_neg).unwrap() + 1.0).abs() < 1e-10);

        let y_flat = vec![3.0, 3.0, 3.0, 3.0, 3.0];
        assert!(correlation_impl(&x, &y_flat).is_none());
        assert!(correlation_impl(&[1.0], &[2.0]).is_none());
    }

    #[test]
    fn test_correlation_small_values() {
        let x = vec![1e-9, 2e-9, 3e-9, 4e-9];
        let y = vec![3e-9, 1e-9, 2e-9, 5e-9];
        let r = correlation_impl(&x, &y).unwrap();
        assert!((r - 0.5291502622129182).abs() < 1e-9);

        let x_flat = vec![0.1, 0.1, 0.1, 0.1];
        assert!(correlation_impl(&x_flat, &y).is_none());
    }

    #[test]
    fn test_correlation_infinite_input() {
        let x = vec![1.0, f64::INFINITY, 3.0];
        let y = vec![2.0, 3.0, 5.0];
        assert!(correlation_impl(&x, &y).is_none());
        assert!(correlation_impl(&y, &x).is_none());
    }

    #[test]
    fn test_pairwise_complete() {
        let (x, y) = pairwise_complete(
            &[Some(1.0), None, Some(3.0), Some(4.0)],
            &[Some(2.0), Some(5.0), None, Some(8.0)],
        );
        assert_eq!(x, vec![1.0, 4.0]);
        assert_eq!(y, vec![2.0, 8.0]);
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts_impl(vec!["b", "a", "a", "c", "b", "a"]);
        assert_eq!(
            counts,
            vec![("a".to_string(), 3), ("b".to_string(), 2), ("c".to_string(), 1)]
        );

        let ties = value_counts_impl(vec!["x", "y"]);
        assert_eq!(ties[0].0, "x");
    }
}
