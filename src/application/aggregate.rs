//! Aggregate engine: descriptive statistics over a filtered view.
//!
//! All computations match the pandas semantics the dashboard's findings
//! were originally calibrated against: quantiles use linear interpolation,
//! skewness is the bias-corrected Fisher-Pearson coefficient, and Pearson
//! correlation of a zero-variance column is NaN — never a silent zero,
//! since a fabricated finite value would mislead the narrative stage.

use crate::application::filter::FilteredView;
use crate::domain::{NumericField, RiskLevel};

/// Axis labels of the correlation matrix: the six numeric fields in
/// canonical order, then the encoded risk level.
pub const CORRELATION_LABELS: [&str; 7] = [
    "Age",
    "SystolicBP",
    "DiastolicBP",
    "BS",
    "BodyTemp",
    "HeartRate",
    "RiskLevel",
];

/// Index of the encoded RiskLevel axis in the correlation matrix.
pub const RISK_AXIS: usize = 6;

/// Tukey outlier bounds and the share of rows falling outside them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierSummary {
    /// Q1 - 1.5*IQR
    pub lower: f64,
    /// Q3 + 1.5*IQR
    pub upper: f64,
    /// Rows strictly outside [lower, upper]
    pub count: usize,
    /// Outlier share of the view, in percent
    pub fraction_pct: f64,
}

/// Distribution shape of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldShape {
    pub mean: f64,
    pub median: f64,
    /// Bias-corrected Fisher-Pearson skewness; NaN for n < 3 or zero variance
    pub skew: f64,
}

/// Symmetric Pearson correlation matrix over the six numeric fields plus
/// the encoded risk level.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    values: [[f64; 7]; 7],
}

impl CorrelationMatrix {
    /// Correlation between axes `i` and `j` (see [`CORRELATION_LABELS`]).
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Correlation of a numeric field with the encoded risk level.
    #[must_use]
    pub fn with_risk(&self, field: NumericField) -> f64 {
        self.values[field.index()][RISK_AXIS]
    }
}

/// Read-only statistics bundle derived from one filtered view.
///
/// Recomputed from scratch whenever the view changes; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSnapshot {
    /// Rows in the view
    pub total: usize,
    /// Per-field arithmetic mean, canonical field order
    pub means: [f64; 6],
    /// Percentage of rows per risk level, indexed by `RiskLevel::code() - 1`
    risk_pct: [f64; 3],
    /// Per-field outlier bounds and fractions, canonical field order
    pub outliers: [OutlierSummary; 6],
    /// Per-field distribution shape, canonical field order
    pub shapes: [FieldShape; 6],
    /// Pearson correlation over fields + encoded risk level
    pub correlation: CorrelationMatrix,
}

impl AggregateSnapshot {
    /// Compute the full snapshot. Returns `None` for an empty view; the
    /// caller is expected to short-circuit to its "no data" state instead.
    #[must_use]
    pub fn compute(view: &FilteredView) -> Option<Self> {
        if view.is_empty() {
            return None;
        }

        let total = view.len();
        let columns: Vec<Vec<f64>> = NumericField::ALL
            .iter()
            .map(|f| view.column(*f))
            .collect();

        let mut means = [0.0; 6];
        let mut outliers = [OutlierSummary {
            lower: 0.0,
            upper: 0.0,
            count: 0,
            fraction_pct: 0.0,
        }; 6];
        let mut shapes = [FieldShape {
            mean: 0.0,
            median: 0.0,
            skew: f64::NAN,
        }; 6];

        for (i, values) in columns.iter().enumerate() {
            means[i] = mean(values);
            outliers[i] = tukey_outliers(values);
            shapes[i] = FieldShape {
                mean: means[i],
                median: median(values),
                skew: skewness(values),
            };
        }

        let mut risk_pct = [0.0; 3];
        for row in view.rows() {
            risk_pct[(row.risk_level.code() - 1) as usize] += 1.0;
        }
        for pct in &mut risk_pct {
            *pct = *pct / total as f64 * 100.0;
        }

        // Seventh column: risk level encoded via the fixed {1,2,3} mapping.
        let encoded: Vec<f64> = view
            .rows()
            .iter()
            .map(|r| r.risk_level.code() as f64)
            .collect();

        let mut axes: Vec<&[f64]> = columns.iter().map(Vec::as_slice).collect();
        axes.push(&encoded);

        let mut values = [[f64::NAN; 7]; 7];
        for i in 0..7 {
            for j in i..7 {
                let r = if i == j {
                    // Unit diagonal by construction, undefined for a
                    // constant column.
                    if variance_sum(axes[i]) > 0.0 {
                        1.0
                    } else {
                        f64::NAN
                    }
                } else {
                    pearson(axes[i], axes[j])
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Some(Self {
            total,
            means,
            risk_pct,
            outliers,
            shapes,
            correlation: CorrelationMatrix { values },
        })
    }

    /// Percentage of rows with the given risk level. Levels absent from the
    /// view yield 0%.
    #[must_use]
    pub fn risk_pct(&self, level: RiskLevel) -> f64 {
        self.risk_pct[(level.code() - 1) as usize]
    }

    /// Mean of one field.
    #[must_use]
    pub fn mean_of(&self, field: NumericField) -> f64 {
        self.means[field.index()]
    }

    /// Outlier summary of one field.
    #[must_use]
    pub fn outliers_of(&self, field: NumericField) -> OutlierSummary {
        self.outliers[field.index()]
    }

    /// Distribution shape of one field.
    #[must_use]
    pub fn shape_of(&self, field: NumericField) -> FieldShape {
        self.shapes[field.index()]
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations from the mean.
fn variance_sum(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum()
}

/// Linear-interpolation quantile over unsorted data, `q` in [0, 1].
fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Bias-corrected Fisher-Pearson skewness (pandas `.skew()`).
///
/// NaN for fewer than three samples or zero variance.
fn skewness(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }

    let m = mean(values);
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / n;

    if m2 == 0.0 {
        return f64::NAN;
    }

    let g1 = m3 / m2.powf(1.5);
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Tukey's rule: a value is an outlier iff strictly outside
/// [Q1 - 1.5*IQR, Q3 + 1.5*IQR].
fn tukey_outliers(values: &[f64]) -> OutlierSummary {
    let q1 = quantile(values, 0.25);
    let q3 = quantile(values, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - 1.5 * iqr;
    let upper = q3 + 1.5 * iqr;

    let count = values.iter().filter(|&&v| v < lower || v > upper).count();

    OutlierSummary {
        lower,
        upper,
        count,
        fraction_pct: count as f64 / values.len() as f64 * 100.0,
    }
}

/// Pearson correlation coefficient; NaN if either column has zero variance.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());

    let mx = mean(x);
    let my = mean(y);

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    if vx == 0.0 || vy == 0.0 {
        return f64::NAN;
    }

    cov / (vx * vy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::filter::{filter, FilterCriteria};
    use crate::domain::PatientRecord;

    fn make_record(
        age: u32,
        systolic: u32,
        diastolic: u32,
        bs: f64,
        temp: f64,
        hr: u32,
        level: RiskLevel,
    ) -> PatientRecord {
        PatientRecord {
            age,
            systolic_bp: systolic,
            diastolic_bp: diastolic,
            bs,
            body_temp: temp,
            heart_rate: hr,
            risk_level: level,
        }
    }

    fn sample_view() -> FilteredView {
        let records = vec![
            make_record(25, 130, 80, 15.0, 98.0, 86, RiskLevel::High),
            make_record(35, 140, 90, 13.0, 98.0, 70, RiskLevel::High),
            make_record(29, 90, 70, 8.0, 100.0, 80, RiskLevel::High),
            make_record(30, 140, 85, 7.0, 98.0, 70, RiskLevel::High),
            make_record(35, 120, 60, 6.1, 98.0, 76, RiskLevel::Low),
            make_record(23, 90, 60, 7.01, 98.0, 76, RiskLevel::Low),
            make_record(23, 130, 70, 7.01, 98.0, 78, RiskLevel::Mid),
            make_record(42, 130, 80, 18.0, 98.0, 70, RiskLevel::High),
        ];
        let criteria = FilterCriteria::full_range(&records);
        filter(&records, &criteria)
    }

    #[test]
    fn test_empty_view_yields_none() {
        let records = vec![make_record(25, 130, 80, 15.0, 98.0, 86, RiskLevel::High)];
        let mut criteria = FilterCriteria::full_range(&records);
        criteria.age = crate::application::filter::FieldRange::new(200.0, 201.0);
        let view = filter(&records, &criteria);

        assert!(AggregateSnapshot::compute(&view).is_none());
    }

    #[test]
    fn test_means() {
        let snapshot = AggregateSnapshot::compute(&sample_view()).unwrap();
        assert_eq!(snapshot.total, 8);
        assert!((snapshot.mean_of(NumericField::Age) - 30.25).abs() < 1e-9);
        assert!((snapshot.mean_of(NumericField::SystolicBP) - 121.25).abs() < 1e-9);
    }

    #[test]
    fn test_risk_percentages_sum_to_100() {
        let snapshot = AggregateSnapshot::compute(&sample_view()).unwrap();
        let sum: f64 = RiskLevel::ALL.iter().map(|l| snapshot.risk_pct(*l)).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((snapshot.risk_pct(RiskLevel::High) - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_absent_level_yields_zero_percent() {
        let records = vec![
            make_record(25, 130, 80, 15.0, 98.0, 86, RiskLevel::High),
            make_record(35, 140, 90, 13.0, 98.0, 70, RiskLevel::High),
        ];
        let criteria = FilterCriteria::full_range(&records);
        let snapshot = AggregateSnapshot::compute(&filter(&records, &criteria)).unwrap();

        assert_eq!(snapshot.risk_pct(RiskLevel::Low), 0.0);
        assert_eq!(snapshot.risk_pct(RiskLevel::Mid), 0.0);
        assert_eq!(snapshot.risk_pct(RiskLevel::High), 100.0);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        // pandas: [1,2,3,4].quantile(0.25) == 1.75
        assert!((quantile(&[1.0, 2.0, 3.0, 4.0], 0.25) - 1.75).abs() < 1e-9);
        assert!((quantile(&[1.0, 2.0, 3.0, 4.0], 0.5) - 2.5).abs() < 1e-9);
        assert!((quantile(&[3.0, 1.0, 2.0], 0.5) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_tukey_bounds_and_strictness() {
        // Q1=2, Q3=4, IQR=2 -> bounds [-1, 7]
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let summary = tukey_outliers(&values);
        assert!((summary.lower - (-1.0)).abs() < 1e-9);
        assert!((summary.upper - 7.0).abs() < 1e-9);
        assert_eq!(summary.count, 0);

        // A value exactly on the bound is not an outlier.
        let on_bound = [1.0, 2.0, 3.0, 4.0, 7.0];
        assert_eq!(tukey_outliers(&on_bound).count, 0);
    }

    #[test]
    fn test_outlier_monotonicity() {
        // Widening the bounds never increases the outlier fraction.
        let values: Vec<f64> = vec![1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 50.0];
        let summary = tukey_outliers(&values);

        let wider_count = values
            .iter()
            .filter(|&&v| v < summary.lower - 10.0 || v > summary.upper + 10.0)
            .count();
        assert!(wider_count <= summary.count);
    }

    #[test]
    fn test_skewness_matches_pandas() {
        // pandas: pd.Series([1,2,3,4,100]).skew() == 2.232395911636458
        let skew = skewness(&[1.0, 2.0, 3.0, 4.0, 100.0]);
        assert!((skew - 2.232395911636458).abs() < 1e-9);

        // Symmetric data has ~zero skew.
        assert!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]).abs() < 1e-9);
    }

    #[test]
    fn test_skewness_undefined_cases() {
        assert!(skewness(&[1.0, 2.0]).is_nan());
        assert!(skewness(&[5.0, 5.0, 5.0, 5.0]).is_nan());
    }

    #[test]
    fn test_pearson_known_values() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);

        let inv = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&x, &inv) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_matrix_symmetry_and_diagonal() {
        let snapshot = AggregateSnapshot::compute(&sample_view()).unwrap();
        let corr = &snapshot.correlation;

        for i in 0..7 {
            for j in 0..7 {
                let a = corr.get(i, j);
                let b = corr.get(j, i);
                assert!(
                    (a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12,
                    "corr[{i}][{j}] != corr[{j}][{i}]"
                );
                if !a.is_nan() {
                    assert!(a >= -1.0 - 1e-9 && a <= 1.0 + 1e-9);
                }
            }
            // Every column in the sample view varies, so the diagonal is 1.
            assert_eq!(corr.get(i, i), 1.0);
        }
    }

    #[test]
    fn test_constant_column_correlation_is_nan() {
        // BodyTemp constant across the view.
        let records = vec![
            make_record(25, 130, 80, 15.0, 98.0, 86, RiskLevel::High),
            make_record(35, 140, 90, 13.0, 98.0, 70, RiskLevel::Low),
            make_record(29, 90, 70, 8.0, 98.0, 80, RiskLevel::Mid),
        ];
        let criteria = FilterCriteria::full_range(&records);
        let snapshot = AggregateSnapshot::compute(&filter(&records, &criteria)).unwrap();

        let temp_axis = NumericField::BodyTemp.index();
        assert!(snapshot.correlation.get(temp_axis, 0).is_nan());
        assert!(snapshot.correlation.get(temp_axis, temp_axis).is_nan());
        // Other axes are unaffected.
        assert_eq!(snapshot.correlation.get(0, 0), 1.0);
    }
}
