//! Headless `PresentationSurface` and `DonationFlow` adapters.
//!
//! They log what would be shown and keep a record of it, which is what the
//! demo binary and the integration tests inspect.

use std::sync::{Mutex, PoisonError};

use domains::{
    CampaignModal, DonateRequest, DonateSource, DonationFlow, FeatureAnnouncement,
    PresentationSurface, Rect, ShareSheet, Toast, YearInReviewDeck,
};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum Presented {
    YearInReview(YearInReviewDeck),
    CampaignModal(CampaignModal),
    FeatureAnnouncement { announcement: FeatureAnnouncement, anchor: Rect },
    ShareSheet(ShareSheet),
    Toast(Toast),
    Url { url: String, external: bool },
    Dismissed,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    presented: Mutex<Vec<Presented>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented(&self) -> Vec<Presented> {
        self.presented
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, item: Presented) {
        self.presented
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }
}

impl PresentationSurface for RecordingSurface {
    fn present_year_in_review(&self, deck: YearInReviewDeck) {
        info!(slides = deck.slides.len(), "present year in review");
        self.record(Presented::YearInReview(deck));
    }

    fn present_campaign_modal(&self, modal: CampaignModal) {
        info!(metrics_id = %modal.asset.metrics_id(), show_maybe_later = modal.show_maybe_later, "present campaign modal");
        self.record(Presented::CampaignModal(modal));
    }

    fn present_feature_announcement(&self, announcement: FeatureAnnouncement, anchor: Rect) {
        info!(title = %announcement.title, x = anchor.x, y = anchor.y, "present feature announcement");
        self.record(Presented::FeatureAnnouncement {
            announcement,
            anchor,
        });
    }

    fn present_share_sheet(&self, sheet: ShareSheet) {
        info!(text = %sheet.text, "present share sheet");
        self.record(Presented::ShareSheet(sheet));
    }

    fn show_toast(&self, toast: Toast) {
        info!(title = %toast.title, "show toast");
        self.record(Presented::Toast(toast));
    }

    fn open_url(&self, url: &str, external: bool) {
        info!(url, external, "open url");
        self.record(Presented::Url {
            url: url.to_string(),
            external,
        });
    }

    fn dismiss(&self) {
        self.record(Presented::Dismissed);
    }
}

/// Records donation requests instead of opening a payment sheet.
#[derive(Debug, Default)]
pub struct RecordingDonationFlow {
    started: Mutex<Vec<DonateRequest>>,
}

impl RecordingDonationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> Vec<DonateRequest> {
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DonationFlow for RecordingDonationFlow {
    fn metrics_id(&self, source: &DonateSource, language_code: &str) -> Option<String> {
        match source {
            DonateSource::YearInReview => Some(format!("{language_code}_yir_iOS")),
            DonateSource::ArticleCampaignModal { metrics_id, .. } => Some(metrics_id.clone()),
        }
    }

    fn start(&self, request: DonateRequest) {
        info!(source = ?request.source, "start donation flow");
        self.started
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}
