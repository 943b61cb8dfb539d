//! # Ports
//!
//! External collaborators consumed by the services. Adapters implement these
//! traits; services only ever hold `Arc<dyn Port>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::AnalyticsEvent;
use crate::error::Result;
use crate::models::{CampaignAsset, Rect, Report, WmfProject};
use crate::presentation::{
    CampaignModal, DonateRequest, DonateSource, FeatureAnnouncement, ShareSheet, Toast,
    YearInReviewDeck,
};

/// Yearly report persistence, written by a background aggregation job.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ReportStore: Send + Sync {
    /// Fails with `DataUnavailable` when the report is missing or corrupt.
    fn fetch_report(&self, year: i32) -> Result<Report>;
}

/// Fundraising campaign configuration and per-asset visibility state.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CampaignConfigStore: Send + Sync {
    /// Active asset for the country/project at `now`, excluding assets that
    /// are permanently hidden or still inside a maybe-later cooldown.
    fn load_active_campaign_asset(
        &self,
        country_code: &str,
        project: &WmfProject,
        now: DateTime<Utc>,
    ) -> Result<Option<CampaignAsset>>;

    async fn is_opted_in(&self, project: &WmfProject) -> Result<bool>;

    fn mark_asset_as_permanently_hidden(&self, asset: &CampaignAsset);

    fn mark_asset_as_maybe_later(&self, asset: &CampaignAsset, now: DateTime<Utc>);

    fn should_show_maybe_later_option(&self, asset: &CampaignAsset, now: DateTime<Utc>) -> bool;
}

/// Persisted "feature announcement already shown" flag.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AnnouncementFlagStore: Send + Sync {
    fn should_show_feature_announcement(&self, primary_project: &WmfProject) -> Result<bool>;
    fn has_presented_feature_announcement(&self) -> bool;
    fn set_has_presented_feature_announcement(&self, presented: bool);
}

/// Fire-and-forget analytics. Must not block or fail the caller.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AnalyticsSink: Send + Sync {
    fn log(&self, event: AnalyticsEvent);
}

/// Opaque modal/sheet presenter.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PresentationSurface: Send + Sync {
    fn present_year_in_review(&self, deck: YearInReviewDeck);
    fn present_campaign_modal(&self, modal: CampaignModal);
    fn present_feature_announcement(&self, announcement: FeatureAnnouncement, anchor: Rect);
    fn present_share_sheet(&self, sheet: ShareSheet);
    fn show_toast(&self, toast: Toast);
    fn open_url(&self, url: &str, external: bool);
    fn dismiss(&self);
}

/// Donation UI, external to the core.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait DonationFlow: Send + Sync {
    fn metrics_id(&self, source: &DonateSource, language_code: &str) -> Option<String>;
    fn start(&self, request: DonateRequest);
}

/// Wall clock, injected so time-dependent transitions are testable.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// `Clock` backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
