//! In-memory `ReportStore`, keyed by reporting year.

use dashmap::DashMap;
use domains::{DomainError, Report, ReportStore, Result};

#[derive(Default)]
pub struct InMemoryReportStore {
    reports: DashMap<i32, Report>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `report`, replacing any report for the same year.
    pub fn insert(&self, report: Report) {
        self.reports.insert(report.year, report);
    }
}

impl ReportStore for InMemoryReportStore {
    fn fetch_report(&self, year: i32) -> Result<Report> {
        self.reports
            .get(&year)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DomainError::DataUnavailable(format!("no report for {year}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_year_is_data_unavailable() {
        let store = InMemoryReportStore::new();
        store.insert(Report {
            year: 2023,
            slides: vec![],
        });

        assert!(store.fetch_report(2023).is_ok());
        assert_eq!(
            store.fetch_report(2024),
            Err(DomainError::DataUnavailable("no report for 2024".into()))
        );
    }
}
