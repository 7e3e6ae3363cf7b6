//! Linear regression and one-way ANOVA
//!
//! Both follow the textbook definitions used by common statistics packages,
//! including their handling of degenerate inputs, so reports can be checked
//! against them.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use super::descriptive::mean;

/// Guards the t statistic against division by zero when |r| = 1
const TINY: f64 = 1.0e-20;

/// Ordinary least-squares fit of y on x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub n: usize,
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation coefficient
    pub r_value: f64,
    /// Two-sided p-value for a zero slope
    pub p_value: f64,
    /// Standard error of the slope
    pub std_err: f64,
}

impl LinearFit {
    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }
}

/// Fit y = slope * x + intercept over paired samples
///
/// Returns `None` with fewer than two pairs, mismatched lengths, or when all
/// x values are identical.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    let n = xs.len();
    if n < 2 || ys.len() != n {
        return None;
    }
    let x_mean = mean(xs);
    let y_mean = mean(ys);
    let nf = n as f64;
    let ss_x = xs.iter().map(|x| (x - x_mean).powi(2)).sum::<f64>() / nf;
    let ss_y = ys.iter().map(|y| (y - y_mean).powi(2)).sum::<f64>() / nf;
    let ss_xy = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum::<f64>()
        / nf;
    if ss_x == 0.0 {
        return None;
    }

    let denominator = (ss_x * ss_y).sqrt();
    let r_value = if denominator == 0.0 {
        0.0
    } else {
        (ss_xy / denominator).clamp(-1.0, 1.0)
    };
    let slope = ss_xy / ss_x;
    let intercept = y_mean - slope * x_mean;

    let (p_value, std_err) = if n == 2 {
        (if ys[0] == ys[1] { 1.0 } else { 0.0 }, 0.0)
    } else {
        let df = (n - 2) as f64;
        let t = r_value * (df / ((1.0 - r_value + TINY) * (1.0 + r_value + TINY))).sqrt();
        let p_value = StudentsT::new(0.0, 1.0, df)
            .map(|dist| 2.0 * dist.sf(t.abs()))
            .unwrap_or(f64::NAN);
        let std_err = ((1.0 - r_value * r_value) * ss_y / ss_x / df).sqrt();
        (p_value, std_err)
    };

    Some(LinearFit {
        n,
        slope,
        intercept,
        r_value,
        p_value,
        std_err,
    })
}

/// One-way analysis of variance across groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anova {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    pub df_within: usize,
}

/// Compare group means with a one-way ANOVA
///
/// Empty groups are ignored. Returns `None` with fewer than two groups or
/// when there are no degrees of freedom left within groups. When every
/// group is constant the statistic is infinite (p = 0) if the means differ,
/// and undefined (NaN) otherwise.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Option<Anova> {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|g| !g.is_empty()).collect();
    let k = groups.len();
    let total: usize = groups.iter().map(|g| g.len()).sum();
    if k < 2 || total <= k {
        return None;
    }

    let all: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    let grand_mean = mean(&all);
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for values in &groups {
        let group_mean = mean(values);
        ss_between += values.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += values.iter().map(|x| (x - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = k - 1;
    let df_within = total - k;
    let (f_statistic, p_value) = if ss_within == 0.0 {
        if ss_between == 0.0 {
            (f64::NAN, f64::NAN)
        } else {
            (f64::INFINITY, 0.0)
        }
    } else {
        let f = (ss_between / df_between as f64) / (ss_within / df_within as f64);
        let p = FisherSnedecor::new(df_between as f64, df_within as f64)
            .map(|dist| dist.sf(f))
            .unwrap_or(f64::NAN);
        (f, p)
    };

    Some(Anova {
        f_statistic,
        p_value,
        df_between,
        df_within,
    })
}

#[cfg(test)]
#[path = "regression_tests.rs"]
mod regression_tests;
