/// Descriptive statistics of one group's y-values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Returns `None` for an empty slice
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = mean(values);
        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            count,
            mean,
            median,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_has_no_summary() {
        assert_eq!(Summary::of(&[]), None);
    }

    #[test]
    fn test_odd_count() {
        let s = Summary::of(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(s.count, 3);
        assert!(close(s.mean, 2.0));
        assert!(close(s.median, 2.0));
        assert!(close(s.std_dev, (2.0f64 / 3.0).sqrt()));
        assert_eq!((s.min, s.max), (1.0, 3.0));
    }

    #[test]
    fn test_even_count_median_averages_middle() {
        let s = Summary::of(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(close(s.median, 2.5));
        assert!(close(s.std_dev, 1.25f64.sqrt()));
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let s = Summary::of(&[7.5]).unwrap();
        assert!(close(s.std_dev, 0.0));
        assert_eq!((s.min, s.median, s.max), (7.5, 7.5, 7.5));
    }
}
