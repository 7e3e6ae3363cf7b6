use super::descriptive::Summary;
use super::grouping::{Group, Grouping};
use super::regression::{linear_regression, one_way_anova};
use crate::json::{as_number, display_value};

/// Numeric y-values of a group and how many were not numeric
fn numeric_values(group: &Group) -> (Vec<f64>, usize) {
    let numbers: Vec<f64> = group.values.iter().filter_map(as_number).collect();
    let ignored = group.values.len() - numbers.len();
    (numbers, ignored)
}

/// Render the statistics report for a grouping
///
/// Lists every reported group with its size and, when a y-field was
/// requested, its descriptive statistics. With two or more groups, adds a
/// pooled linear regression (numeric keys only) and a one-way ANOVA
/// (y-field only).
pub fn report(grouping: &Grouping) -> String {
    let field = grouping.field();
    let y_field = grouping.y_field();
    let mut lines = Vec::new();

    match y_field {
        Some(y) => lines.push(format!("Field: {} (y: {})", field, y)),
        None => lines.push(format!("Field: {}", field)),
    }
    lines.push(format!(
        "Records: {} in {} groups",
        grouping.total_records(),
        grouping.groups().len()
    ));
    if !grouping.diagnostics().is_empty() {
        lines.push(format!(
            "Skipped {} records where '{}' could not be resolved",
            grouping.diagnostics().len(),
            field
        ));
    }
    if grouping.excluded_count() > 0 {
        lines.push(format!(
            "Excluded {} of {} groups with fewer than {} records",
            grouping.excluded_count(),
            grouping.groups().len(),
            grouping.min_n()
        ));
    }
    lines.push(String::new());

    let valid: Vec<&Group> = grouping.valid_groups().collect();
    let mut samples: Vec<Vec<f64>> = Vec::with_capacity(valid.len());
    for group in &valid {
        let label = format!("{} = {}", field, display_value(&group.key));
        let (numbers, ignored) = numeric_values(group);
        let line = match (y_field, Summary::of(&numbers)) {
            (Some(_), Some(s)) => format!(
                "{}: n={}, mean={:.3}, median={:.3}, std={:.3}, min={:.3}, max={:.3}",
                label,
                group.len(),
                s.mean,
                s.median,
                s.std_dev,
                s.min,
                s.max
            ),
            _ => format!("{}: n={}", label, group.len()),
        };
        if y_field.is_some() && ignored > 0 {
            lines.push(format!("{} ({} non-numeric values ignored)", line, ignored));
        } else {
            lines.push(line);
        }
        samples.push(numbers);
    }

    if valid.len() >= 2 {
        if valid.iter().all(|group| group.key.is_number()) {
            lines.push(String::new());
            lines.push(regression_line(&valid, &samples));
        }
        if y_field.is_some() {
            lines.push(String::new());
            lines.push(match one_way_anova(&samples) {
                Some(anova) => format!(
                    "ANOVA: F={:.3}, p={:.3} (df={}, {})",
                    anova.f_statistic, anova.p_value, anova.df_between, anova.df_within
                ),
                None => "ANOVA: not enough samples".to_string(),
            });
        }
    }

    lines.join("\n")
}

fn regression_line(groups: &[&Group], samples: &[Vec<f64>]) -> String {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (group, numbers) in groups.iter().zip(samples) {
        let x = group.key.as_f64().unwrap_or(f64::NAN);
        xs.extend(std::iter::repeat_n(x, numbers.len()));
        ys.extend_from_slice(numbers);
    }
    match linear_regression(&xs, &ys) {
        Some(fit) => format!(
            "Linear regression: slope={:.3}, intercept={:.3}, R²={:.3}, p={:.3}, stderr={:.3}",
            fit.slope,
            fit.intercept,
            fit.r_squared(),
            fit.p_value,
            fit.std_err
        ),
        None => "Linear regression: not enough distinct x values".to_string(),
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
