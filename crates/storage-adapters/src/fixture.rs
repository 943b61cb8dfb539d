//! JSON fixture that seeds the in-memory stores.
//!
//! ```json
//! {
//!   "reports": [{ "year": 2024, "slides": [{ "id": "edit_count", "display": true, "data": 750 }] }],
//!   "campaigns": [ ...CampaignAsset... ],
//!   "opted_in": [{ "kind": "wikipedia", "language_code": "en" }],
//!   "announcement_projects": [{ "kind": "wikipedia", "language_code": "en" }]
//! }
//! ```
//!
//! Slide `data` is any JSON value; it is stored re-encoded, exactly as the
//! aggregation job would write it, so non-integer values exercise the
//! decode-failure path.

use std::path::Path;

use domains::{CampaignAsset, Report, ReportSlideEntry, SlideId, WmfProject};
use serde::Deserialize;
use thiserror::Error;

use crate::{InMemoryAnnouncementFlags, InMemoryCampaignStore, InMemoryReportStore};

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub reports: Vec<ReportFixture>,
    #[serde(default)]
    pub campaigns: Vec<CampaignAsset>,
    #[serde(default)]
    pub opted_in: Vec<WmfProject>,
    #[serde(default)]
    pub announcement_projects: Vec<WmfProject>,
}

#[derive(Debug, Deserialize)]
pub struct ReportFixture {
    pub year: i32,
    #[serde(default)]
    pub slides: Vec<SlideFixture>,
}

#[derive(Debug, Deserialize)]
pub struct SlideFixture {
    pub id: SlideId,
    pub display: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl Fixture {
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FixtureError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json_str(&json)
    }

    pub fn reports(&self) -> Result<Vec<Report>, FixtureError> {
        self.reports
            .iter()
            .map(|report| -> Result<Report, FixtureError> {
                let slides = report
                    .slides
                    .iter()
                    .map(|slide| -> Result<ReportSlideEntry, FixtureError> {
                        Ok(ReportSlideEntry {
                            id: slide.id,
                            display: slide.display,
                            data: slide.data.as_ref().map(serde_json::to_vec).transpose()?,
                        })
                    })
                    .collect::<Result<Vec<_>, FixtureError>>()?;
                Ok(Report {
                    year: report.year,
                    slides,
                })
            })
            .collect()
    }

    /// Copies the fixture into the given stores.
    pub fn seed(
        &self,
        reports: &InMemoryReportStore,
        campaigns: &InMemoryCampaignStore,
        announcements: &InMemoryAnnouncementFlags,
    ) -> Result<(), FixtureError> {
        for report in self.reports()? {
            reports.insert(report);
        }
        for asset in &self.campaigns {
            campaigns.insert_asset(asset.clone());
        }
        for project in &self.opted_in {
            campaigns.set_opted_in(project.clone(), true);
        }
        for project in &self.announcement_projects {
            announcements.enable_for(project.clone());
        }
        tracing::debug!(
            reports = self.reports.len(),
            campaigns = self.campaigns.len(),
            "seeded in-memory stores"
        );
        Ok(())
    }
}
