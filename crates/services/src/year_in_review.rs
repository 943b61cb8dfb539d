//! # YearInReviewCoordinator
//!
//! Assembles the deck, presents it, forwards the deck's logging callbacks to
//! analytics, and dispatches its `Donate` / `Share` actions.

use std::sync::{Arc, Mutex};

use domains::{
    ActivityType, AnalyticsEvent, DonateRequest, DonateSource, Rect, ShareImage, ShareSheet,
    YearInReviewAction, YearInReviewDeck,
};
use tracing::{debug, info, info_span};

use crate::slides::SlideContentResolver;
use crate::{copy, lock, FlowSettings, Services};

pub struct YearInReviewCoordinator {
    services: Services,
    settings: Arc<FlowSettings>,
    resolver: SlideContentResolver,
    deck: Mutex<Option<YearInReviewDeck>>,
}

impl YearInReviewCoordinator {
    pub fn new(services: Services, settings: Arc<FlowSettings>) -> Self {
        let resolver = SlideContentResolver::new(settings.collective.clone());
        Self {
            services,
            settings,
            resolver,
            deck: Mutex::new(None),
        }
    }

    /// Resolves the slides for the configured year and presents the deck.
    pub fn start(&self) -> YearInReviewDeck {
        let _span = info_span!("year_in_review.start", year = self.settings.report_year).entered();

        let slides = self
            .resolver
            .resolve_from_store(self.services.reports.as_ref(), self.settings.report_year);

        let deck = YearInReviewDeck {
            strings: copy::year_in_review_strings(),
            slides: slides.into_iter().collect(),
            username: self.settings.username.clone(),
            share_link: self.settings.share_link.clone(),
            hashtag: self.settings.hashtag.clone(),
        };

        info!(
            slides = ?deck.slides.iter().map(|s| s.logging_id.as_str()).collect::<Vec<_>>(),
            "presenting year in review"
        );
        *lock(&self.deck) = Some(deck.clone());
        self.services.surface.present_year_in_review(deck.clone());
        deck
    }

    pub fn deck(&self) -> Option<YearInReviewDeck> {
        lock(&self.deck).clone()
    }

    pub fn slide_did_appear(&self, slide_logging_id: &str) {
        self.services.analytics.log(AnalyticsEvent::YearInReviewSlideImpression {
            slide_logging_id: slide_logging_id.to_string(),
        });
    }

    pub fn did_tap_next(&self, slide_logging_id: &str) {
        self.services.analytics.log(AnalyticsEvent::YearInReviewDidTapNext {
            slide_logging_id: slide_logging_id.to_string(),
        });
    }

    pub fn did_tap_done(&self, slide_logging_id: &str) {
        self.services.analytics.log(AnalyticsEvent::YearInReviewDidTapDone {
            slide_logging_id: slide_logging_id.to_string(),
        });
        self.services.surface.dismiss();
    }

    pub fn intro_did_tap_continue(&self) {
        self.services.analytics.log(AnalyticsEvent::YearInReviewDidTapIntroContinue);
    }

    pub fn intro_did_tap_disable(&self) {
        self.services.analytics.log(AnalyticsEvent::YearInReviewDidTapIntroDisable);
    }

    /// Swipe-to-dismiss counts as "done" on the slide that was showing.
    pub fn presentation_will_dismiss(&self, current_slide_logging_id: &str) {
        self.services.analytics.log(AnalyticsEvent::YearInReviewDidTapDone {
            slide_logging_id: current_slide_logging_id.to_string(),
        });
    }

    pub fn handle_action(&self, action: YearInReviewAction) {
        match action {
            YearInReviewAction::Donate {
                source_rect,
                slide_logging_id,
            } => self.donate(source_rect, slide_logging_id),
            YearInReviewAction::Share { image } => self.share(image),
        }
    }

    fn donate(&self, source_rect: Rect, slide_logging_id: String) {
        let source = DonateSource::YearInReview;
        let metrics_id = self
            .settings
            .app_language
            .as_deref()
            .and_then(|language| self.services.donation.metrics_id(&source, language));

        match metrics_id {
            Some(metrics_id) => self.services.analytics.log(AnalyticsEvent::YearInReviewDidTapDonate {
                slide_logging_id,
                metrics_id,
            }),
            None => debug!(%slide_logging_id, "no donate metrics id for app language"),
        }

        self.services.donation.start(DonateRequest {
            source,
            button_rect: source_rect,
        });
    }

    fn share(&self, image: ShareImage) {
        let Some(deck) = self.deck() else {
            debug!("share requested before the deck was started");
            return;
        };

        self.services.surface.present_share_sheet(ShareSheet {
            image,
            text: share_text(&deck),
            excluded_activities: vec![
                ActivityType::Print,
                ActivityType::AssignToContact,
                ActivityType::AddToReadingList,
            ],
        });
    }
}

fn share_text(deck: &YearInReviewDeck) -> String {
    format!("{} ({}){}", deck.strings.share_text, deck.share_link, deck.hashtag)
}
