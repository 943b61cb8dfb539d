//! # integration-tests
//!
//! Shared wiring for the cross-crate tests: the real in-memory adapters
//! behind a settable clock.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use domains::{
    AnalyticsEvent, CampaignAction, CampaignAsset, Clock, DeviceIdiom, LayoutContext, Report,
    ReportSlideEntry, SlideId, WmfProject,
};
use services::{ArticleScreen, FlowSettings, Services};
use storage_adapters::{
    InMemoryAnnouncementFlags, InMemoryCampaignStore, InMemoryReportStore, MemoryAnalyticsSink,
    Presented, RecordingDonationFlow, RecordingSurface,
};

pub const ARTICLE_URL: &str = "https://en.wikipedia.org/wiki/Octopus";

pub struct SettableClock(Mutex<DateTime<Utc>>);

impl SettableClock {
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for SettableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct Harness {
    pub reports: Arc<InMemoryReportStore>,
    pub campaigns: Arc<InMemoryCampaignStore>,
    pub announcements: Arc<InMemoryAnnouncementFlags>,
    pub analytics: Arc<MemoryAnalyticsSink>,
    pub surface: Arc<RecordingSurface>,
    pub donation: Arc<RecordingDonationFlow>,
    pub clock: Arc<SettableClock>,
    pub settings: Arc<FlowSettings>,
}

impl Harness {
    /// Clock at 2024-11-20 12:00 UTC, 24h maybe-later cooldown, no toast delay.
    pub fn new() -> Self {
        Self {
            reports: Arc::new(InMemoryReportStore::new()),
            campaigns: Arc::new(InMemoryCampaignStore::new(chrono::Duration::hours(24))),
            announcements: Arc::new(InMemoryAnnouncementFlags::new()),
            analytics: Arc::new(MemoryAnalyticsSink::new()),
            surface: Arc::new(RecordingSurface::new()),
            donation: Arc::new(RecordingDonationFlow::new()),
            clock: Arc::new(SettableClock(Mutex::new(at(20, 12)))),
            settings: Arc::new(FlowSettings {
                app_language: Some("en".into()),
                toast_delay: Duration::ZERO,
                ..FlowSettings::default()
            }),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            reports: self.reports.clone(),
            campaigns: self.campaigns.clone(),
            announcements: self.announcements.clone(),
            analytics: self.analytics.clone(),
            surface: self.surface.clone(),
            donation: self.donation.clone(),
            clock: self.clock.clone(),
        }
    }

    pub fn screen(&self, layout: LayoutContext) -> Arc<ArticleScreen> {
        ArticleScreen::new(
            self.services(),
            Arc::clone(&self.settings),
            ARTICLE_URL,
            Some(en()),
            layout,
        )
    }

    /// An opted-in viewer with a running campaign.
    pub fn with_campaign(self, asset: CampaignAsset) -> Self {
        self.campaigns.set_opted_in(asset.project.clone(), true);
        self.campaigns.insert_asset(asset);
        self
    }

    pub fn with_announcement(self) -> Self {
        self.announcements.enable_for(en());
        self
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.analytics.events()
    }

    pub fn campaign_modals(&self) -> usize {
        self.surface
            .presented()
            .iter()
            .filter(|p| matches!(p, Presented::CampaignModal(_)))
            .count()
    }

    pub fn announcements_shown(&self) -> usize {
        self.surface
            .presented()
            .iter()
            .filter(|p| matches!(p, Presented::FeatureAnnouncement { .. }))
            .count()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.surface
            .presented()
            .into_iter()
            .filter_map(|p| match p {
                Presented::Toast(toast) => Some(toast.title),
                _ => None,
            })
            .collect()
    }
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, day, hour, 0, 0).unwrap()
}

pub fn en() -> WmfProject {
    WmfProject::wikipedia("en")
}

pub fn campaign(id: &str, end: DateTime<Utc>) -> CampaignAsset {
    CampaignAsset {
        id: id.into(),
        language_code: "en".into(),
        country_code: "US".into(),
        project: en(),
        start: at(1, 0),
        end,
        text_html: "<p>Please don't skip this 1-minute read.</p>".into(),
        footer_html: "Donor privacy policy".into(),
        actions: vec![
            CampaignAction {
                title: "Donate now".into(),
                url: Some(format!("https://donate.wikimedia.org/?wmf_campaign={id}")),
            },
            CampaignAction {
                title: "Maybe later".into(),
                url: None,
            },
        ],
    }
}

pub fn phone() -> LayoutContext {
    LayoutContext {
        idiom: DeviceIdiom::Phone,
        navigation_bar_hidden_height: 0.0,
        navigation_bar_attached: true,
        navigation_bar_width: 390.0,
        safe_area_top: 47.0,
        bar_top_spacing: 0.0,
    }
}

pub fn slide(id: SlideId, data: serde_json::Value) -> ReportSlideEntry {
    ReportSlideEntry {
        id,
        display: true,
        data: Some(serde_json::to_vec(&data).unwrap()),
    }
}

pub fn report(year: i32, slides: Vec<ReportSlideEntry>) -> Report {
    Report { year, slides }
}
