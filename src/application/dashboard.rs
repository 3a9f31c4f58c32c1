//! Dashboard service: one interaction cycle from criteria to report.
//!
//! Owns the immutable dataset and derives everything else per request:
//! filter, aggregate, narrative. The report is a value; nothing here holds
//! state between cycles, so stale statistics cannot survive a criteria
//! change.

use std::sync::Arc;

use crate::application::aggregate::AggregateSnapshot;
use crate::application::filter::{filter, FilterCriteria, FilteredView};
use crate::application::narrative::{
    dominant_feature, health_alerts, key_findings, majority_risk, rank_correlations,
    rank_outliers, recommendation, CorrelationPair, HealthAlert, KeyFindings, OutlierRanking,
    SkewShape,
};
use crate::domain::{NumericField, PatientRecord, RiskLevel};

/// Everything the dashboard renders for a non-empty filtered view.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub view: FilteredView,
    pub snapshot: AggregateSnapshot,
    pub outliers: OutlierRanking,
    /// Distinct correlation pairs, strongest first
    pub correlations: Vec<CorrelationPair>,
    /// Per-field distribution shape, canonical field order
    pub shapes: [(NumericField, SkewShape); 6],
    pub alerts: Vec<HealthAlert>,
    /// Field most associated with risk, with its signed coefficient
    pub dominant: Option<(NumericField, f64)>,
    pub findings: KeyFindings,
    pub majority: RiskLevel,
    pub recommendation: String,
}

/// Outcome of one interaction cycle.
///
/// `NoData` is the dashboard's answer to criteria that admit zero rows. It
/// is a first-class state, not an error: the aggregate and narrative stages
/// are skipped entirely and the UI renders its empty-view panel.
#[derive(Debug, Clone)]
pub enum DashboardReport {
    NoData,
    Ready(Box<ReportData>),
}

/// Serves dashboard reports over a fixed dataset.
pub struct DashboardService {
    records: Arc<Vec<PatientRecord>>,
}

impl DashboardService {
    #[must_use]
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// The full dataset, unfiltered.
    #[must_use]
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Criteria spanning the dataset's per-field min/max; admits every row.
    #[must_use]
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::full_range(&self.records)
    }

    /// Run one full cycle: filter, aggregate, narrative.
    #[must_use]
    pub fn report(&self, criteria: &FilterCriteria) -> DashboardReport {
        let view = filter(&self.records, criteria);

        let Some(snapshot) = AggregateSnapshot::compute(&view) else {
            tracing::debug!("Criteria admitted zero rows, skipping aggregation");
            return DashboardReport::NoData;
        };

        tracing::debug!(rows = view.len(), "Report computed");

        let dominant = dominant_feature(&snapshot.correlation);
        let mut shapes = [(NumericField::Age, SkewShape::Undefined); 6];
        for (i, field) in NumericField::ALL.iter().enumerate() {
            shapes[i] = (*field, SkewShape::classify(snapshot.shape_of(*field).skew));
        }

        DashboardReport::Ready(Box::new(ReportData {
            outliers: rank_outliers(&snapshot),
            correlations: rank_correlations(&snapshot.correlation),
            shapes,
            alerts: health_alerts(&snapshot),
            dominant,
            findings: key_findings(&view),
            majority: majority_risk(&view),
            recommendation: recommendation(dominant),
            snapshot,
            view,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::filter::FieldRange;

    fn dataset() -> Vec<PatientRecord> {
        vec![
            PatientRecord {
                age: 25,
                systolic_bp: 130,
                diastolic_bp: 80,
                bs: 15.0,
                body_temp: 98.0,
                heart_rate: 86,
                risk_level: RiskLevel::High,
            },
            PatientRecord {
                age: 35,
                systolic_bp: 140,
                diastolic_bp: 90,
                bs: 13.0,
                body_temp: 98.6,
                heart_rate: 70,
                risk_level: RiskLevel::High,
            },
            PatientRecord {
                age: 23,
                systolic_bp: 90,
                diastolic_bp: 60,
                bs: 7.01,
                body_temp: 98.0,
                heart_rate: 76,
                risk_level: RiskLevel::Low,
            },
            PatientRecord {
                age: 30,
                systolic_bp: 120,
                diastolic_bp: 75,
                bs: 6.9,
                body_temp: 98.0,
                heart_rate: 72,
                risk_level: RiskLevel::Mid,
            },
        ]
    }

    #[test]
    fn test_default_criteria_yields_full_report() {
        let service = DashboardService::new(dataset());
        let report = service.report(&service.default_criteria());

        let DashboardReport::Ready(data) = report else {
            panic!("expected Ready");
        };
        assert_eq!(data.view.len(), 4);
        assert_eq!(data.snapshot.total, 4);
        assert_eq!(data.outliers.ranked.len(), 6);
        assert_eq!(data.majority, RiskLevel::High);
        assert_eq!(data.findings.highest_systolic, 140.0);
    }

    #[test]
    fn test_empty_view_short_circuits_to_no_data() {
        let service = DashboardService::new(dataset());
        let mut criteria = service.default_criteria();
        criteria.age = FieldRange::new(200.0, 201.0);

        assert!(matches!(
            service.report(&criteria),
            DashboardReport::NoData
        ));
    }

    #[test]
    fn test_report_reflects_narrowed_criteria() {
        let service = DashboardService::new(dataset());
        let mut criteria = service.default_criteria();
        criteria.bs = FieldRange::new(6.0, 8.0);

        let DashboardReport::Ready(data) = service.report(&criteria) else {
            panic!("expected Ready");
        };
        assert_eq!(data.view.len(), 2);
        // The surviving rows have normal blood sugar, so the alert the full
        // dataset triggers is gone.
        assert!(!data
            .alerts
            .contains(&crate::application::narrative::HealthAlert::ElevatedBloodSugar));
    }
}
