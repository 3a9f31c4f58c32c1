//! Narrative generator: turns an aggregate snapshot into ranked findings
//! and fixed-template prose.
//!
//! Everything here is a pure function of the snapshot (plus the filtered
//! view for the few findings that need raw rows). No thresholds are
//! configurable; the cut-offs below are the dashboard's published ones.

use crate::application::aggregate::{AggregateSnapshot, CorrelationMatrix, CORRELATION_LABELS};
use crate::application::filter::FilteredView;
use crate::domain::{NumericField, RiskLevel};

/// Distribution shape classification with fixed ±0.5 thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkewShape {
    /// Skewness > 0.5: bulk of the values sits low, long right tail
    RightSkewed,
    /// Skewness < -0.5: bulk of the values sits high, long left tail
    LeftSkewed,
    /// Skewness within [-0.5, 0.5]
    Symmetric,
    /// Skewness is NaN (constant column or fewer than three rows)
    Undefined,
}

impl SkewShape {
    /// Classify a skewness coefficient. Boundary values count as symmetric.
    #[must_use]
    pub fn classify(skew: f64) -> Self {
        if skew.is_nan() {
            Self::Undefined
        } else if skew > 0.5 {
            Self::RightSkewed
        } else if skew < -0.5 {
            Self::LeftSkewed
        } else {
            Self::Symmetric
        }
    }

    /// Human-readable shape description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::RightSkewed => "right-skewed (more low values)",
            Self::LeftSkewed => "left-skewed (more high values)",
            Self::Symmetric => "approximately symmetric",
            Self::Undefined => "shape undefined (too few distinct values)",
        }
    }
}

/// Outlier fractions per field, ranked from most to least affected.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRanking {
    /// (field, outlier percentage), descending by percentage. Ties keep
    /// canonical field order, so the ranking is deterministic.
    pub ranked: Vec<(NumericField, f64)>,
}

impl OutlierRanking {
    /// Field with the largest outlier share.
    #[must_use]
    pub fn most(&self) -> (NumericField, f64) {
        self.ranked[0]
    }

    /// Field with the smallest outlier share.
    #[must_use]
    pub fn least(&self) -> (NumericField, f64) {
        self.ranked[self.ranked.len() - 1]
    }
}

/// Rank fields by outlier percentage, descending.
#[must_use]
pub fn rank_outliers(snapshot: &AggregateSnapshot) -> OutlierRanking {
    let mut ranked: Vec<(NumericField, f64)> = NumericField::ALL
        .iter()
        .map(|f| (*f, snapshot.outliers_of(*f).fraction_pct))
        .collect();

    // Stable sort: equal percentages retain canonical field order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    OutlierRanking { ranked }
}

/// One off-diagonal correlation pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationPair {
    pub a: &'static str,
    pub b: &'static str,
    pub r: f64,
}

/// All distinct axis pairs ranked by correlation, strongest first.
///
/// Self-pairs are excluded by iterating the strict upper triangle of the
/// matrix, so a legitimate off-diagonal correlation of exactly 1.0 still
/// appears in the ranking. NaN entries (constant columns) are skipped.
#[must_use]
pub fn rank_correlations(matrix: &CorrelationMatrix) -> Vec<CorrelationPair> {
    let mut pairs = Vec::new();
    for i in 0..CORRELATION_LABELS.len() {
        for j in (i + 1)..CORRELATION_LABELS.len() {
            let r = matrix.get(i, j);
            if r.is_nan() {
                continue;
            }
            pairs.push(CorrelationPair {
                a: CORRELATION_LABELS[i],
                b: CORRELATION_LABELS[j],
                r,
            });
        }
    }

    pairs.sort_by(|a, b| b.r.partial_cmp(&a.r).unwrap_or(std::cmp::Ordering::Equal));
    pairs
}

/// Population-level health alerts derived from the filtered means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthAlert {
    /// Mean BS > 8 mmol/L
    ElevatedBloodSugar,
    /// Mean SystolicBP > 130 mmHg
    ElevatedSystolic,
    /// Mean DiastolicBP > 85 mmHg
    ElevatedDiastolic,
    /// Mean BodyTemp > 37.5
    ElevatedTemperature,
}

impl HealthAlert {
    /// Warning text shown in the population insight panel.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::ElevatedBloodSugar => "Average blood sugar in this group is high",
            Self::ElevatedSystolic => "Average systolic blood pressure is high",
            Self::ElevatedDiastolic => "Average diastolic blood pressure is high",
            Self::ElevatedTemperature => "Average body temperature trends high",
        }
    }
}

/// Shown when no alert threshold is crossed.
pub const ALL_INDICATORS_NORMAL: &str =
    "Most population indicators are within the normal range";

/// Note pinned next to the risk composition panel.
pub const CLINICAL_NOTE: &str = "Patients classified as High Risk should receive closer \
     monitoring, especially for blood pressure and glucose levels.";

/// Evaluate the four fixed alert thresholds against the snapshot means.
///
/// An empty result means the population looks normal; render
/// [`ALL_INDICATORS_NORMAL`] instead.
#[must_use]
pub fn health_alerts(snapshot: &AggregateSnapshot) -> Vec<HealthAlert> {
    let mut alerts = Vec::new();
    if snapshot.mean_of(NumericField::BS) > 8.0 {
        alerts.push(HealthAlert::ElevatedBloodSugar);
    }
    if snapshot.mean_of(NumericField::SystolicBP) > 130.0 {
        alerts.push(HealthAlert::ElevatedSystolic);
    }
    if snapshot.mean_of(NumericField::DiastolicBP) > 85.0 {
        alerts.push(HealthAlert::ElevatedDiastolic);
    }
    if snapshot.mean_of(NumericField::BodyTemp) > 37.5 {
        alerts.push(HealthAlert::ElevatedTemperature);
    }
    alerts
}

/// The field most associated with risk: max |corr(field, RiskLevel)| over
/// the six numeric fields, returned with its signed coefficient.
///
/// `None` when every field's correlation with risk is NaN.
#[must_use]
pub fn dominant_feature(matrix: &CorrelationMatrix) -> Option<(NumericField, f64)> {
    NumericField::ALL
        .iter()
        .filter_map(|f| {
            let r = matrix.with_risk(*f);
            if r.is_nan() {
                None
            } else {
                Some((*f, r))
            }
        })
        .max_by(|a, b| {
            a.1.abs()
                .partial_cmp(&b.1.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Headline figures for the key findings panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyFindings {
    /// Highest systolic blood pressure in the view, mmHg
    pub highest_systolic: f64,
    /// Highest blood sugar in the view, mmol/L
    pub highest_bs: f64,
    /// Mean age of high-risk rows; None when the view has none
    pub avg_age_high: Option<f64>,
    /// Mean age of low-risk rows; None when the view has none
    pub avg_age_low: Option<f64>,
}

/// Compute the key findings over a non-empty view.
#[must_use]
pub fn key_findings(view: &FilteredView) -> KeyFindings {
    let group_mean_age = |level: RiskLevel| {
        let ages: Vec<f64> = view
            .rows()
            .iter()
            .filter(|r| r.risk_level == level)
            .map(|r| f64::from(r.age))
            .collect();
        if ages.is_empty() {
            None
        } else {
            Some(ages.iter().sum::<f64>() / ages.len() as f64)
        }
    };

    KeyFindings {
        highest_systolic: view
            .column(NumericField::SystolicBP)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max),
        highest_bs: view
            .column(NumericField::BS)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max),
        avg_age_high: group_mean_age(RiskLevel::High),
        avg_age_low: group_mean_age(RiskLevel::Low),
    }
}

/// Most frequent risk category in the view. Ties resolve toward the more
/// severe level.
#[must_use]
pub fn majority_risk(view: &FilteredView) -> RiskLevel {
    let mut counts = [0usize; 3];
    for row in view.rows() {
        counts[(row.risk_level.code() - 1) as usize] += 1;
    }

    // ALL is ordered high -> mid -> low; the strict comparison keeps the
    // first (most severe) level on ties.
    let mut best = RiskLevel::ALL[0];
    for level in RiskLevel::ALL {
        if counts[(level.code() - 1) as usize] > counts[(best.code() - 1) as usize] {
            best = level;
        }
    }
    best
}

/// Monitoring recommendation keyed off the dominant feature.
#[must_use]
pub fn recommendation(dominant: Option<(NumericField, f64)>) -> String {
    match dominant {
        Some((field, _)) => format!(
            "Focus monitoring on {field}, the variable most associated with risk \
             in this group. Screen patients with extreme values regularly, and \
             treat predictions as decision support, not a primary diagnosis.",
        ),
        None => "The filtered group is too uniform to single out a dominant \
                 variable. Screen patients with extreme values regularly, and \
                 treat predictions as decision support, not a primary diagnosis."
            .to_string(),
    }
}
