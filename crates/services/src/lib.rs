//! services
//!
//! Decision logic for the Year-in-Review deck and the fundraising /
//! feature-announcement surfaces shown on article screens.
//!
//! All collaborators arrive through [`Services`], built once at process
//! start and cloned (cheaply, it is a bundle of `Arc`s) into every flow.

pub mod article_screen;
pub mod campaign_modal;
pub mod copy;
pub mod eligibility;
pub mod slides;
pub mod year_in_review;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use domains::{
    AnalyticsSink, AnnouncementFlagStore, CampaignConfigStore, Clock, DonationFlow,
    PresentationSurface, ReportStore,
};

pub use article_screen::{AppearanceOutcome, ArticleScreen};
pub use campaign_modal::CampaignModalController;
pub use copy::{CollectiveStats, EDIT_COUNT_CAP};
pub use eligibility::{CampaignEligibilityGate, SurfaceRequest};
pub use slides::{SlideContentResolver, SLIDE_COUNT};
pub use year_in_review::YearInReviewCoordinator;

/// Process-wide collaborators. Initialized once in `main`, never torn down.
#[derive(Clone)]
pub struct Services {
    pub reports: Arc<dyn ReportStore>,
    pub campaigns: Arc<dyn CampaignConfigStore>,
    pub announcements: Arc<dyn AnnouncementFlagStore>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub surface: Arc<dyn PresentationSurface>,
    pub donation: Arc<dyn DonationFlow>,
    pub clock: Arc<dyn Clock>,
}

/// Settings consumed by the flows, mapped from the `configs` crate by the
/// binary.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    pub report_year: i32,
    pub app_language: Option<String>,
    pub country_code: String,
    pub username: Option<String>,
    pub share_link: String,
    pub hashtag: String,
    pub collective: CollectiveStats,
    pub toast_delay: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            report_year: 2024,
            app_language: None,
            country_code: "US".into(),
            username: None,
            share_link:
                "https://apps.apple.com/app/apple-store/id324715238?pt=208305&ct=yir_2024_share&mt=8"
                    .into(),
            hashtag: "#WikipediaYearInReview".into(),
            collective: CollectiveStats::default(),
            toast_delay: Duration::from_millis(500),
        }
    }
}

/// Handlers never leave shared state half-written, so a poisoned lock is
/// still safe to use.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
