//! Range filter: narrows the dataset to rows matching inclusive ranges.
//!
//! Four fields participate in filtering (Age, BS, SystolicBP, DiastolicBP);
//! the remaining columns are carried through untouched. An empty result is
//! a valid terminal state, not an error: it tells the caller to halt the
//! aggregate and narrative stages for this interaction cycle.

use crate::domain::{NumericField, PatientRecord};

/// An inclusive closed range over one numeric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    /// Create a range, swapping the endpoints if they arrive inverted so
    /// the min ≤ max invariant always holds.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether a value lies inside the closed interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Filter criteria: one inclusive range per filterable field.
///
/// Constructed fresh per interaction; the default equals the dataset's
/// per-field min/max, which admits every row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub age: FieldRange,
    pub bs: FieldRange,
    pub systolic_bp: FieldRange,
    pub diastolic_bp: FieldRange,
}

impl FilterCriteria {
    /// Criteria spanning the full dataset range per field.
    ///
    /// For an empty dataset every range degenerates to [0, 0].
    #[must_use]
    pub fn full_range(records: &[PatientRecord]) -> Self {
        let bounds = |field: NumericField| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for record in records {
                let v = field.value(record);
                min = min.min(v);
                max = max.max(v);
            }
            if records.is_empty() {
                FieldRange::new(0.0, 0.0)
            } else {
                FieldRange::new(min, max)
            }
        };

        Self {
            age: bounds(NumericField::Age),
            bs: bounds(NumericField::BS),
            systolic_bp: bounds(NumericField::SystolicBP),
            diastolic_bp: bounds(NumericField::DiastolicBP),
        }
    }

    /// Whether a record satisfies all four ranges simultaneously.
    #[must_use]
    pub fn matches(&self, record: &PatientRecord) -> bool {
        self.age.contains(f64::from(record.age))
            && self.bs.contains(record.bs)
            && self.systolic_bp.contains(f64::from(record.systolic_bp))
            && self.diastolic_bp.contains(f64::from(record.diastolic_bp))
    }
}

/// The subsequence of the dataset matching the active criteria.
///
/// Always derived, never mutated in place; recomputed on every criteria
/// change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    rows: Vec<PatientRecord>,
}

impl FilteredView {
    /// The filtered rows, in original dataset order.
    #[must_use]
    pub fn rows(&self) -> &[PatientRecord] {
        &self.rows
    }

    /// Number of rows in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the view admitted zero rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one field across the view, in row order.
    #[must_use]
    pub fn column(&self, field: NumericField) -> Vec<f64> {
        self.rows.iter().map(|r| field.value(r)).collect()
    }
}

/// Narrow a dataset to the rows matching all four criteria ranges.
///
/// Preserves row order. The result may be empty; that is an expected
/// outcome, not an error.
#[must_use]
pub fn filter(records: &[PatientRecord], criteria: &FilterCriteria) -> FilteredView {
    let rows = records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect();

    FilteredView { rows }
}
