//! # ArticleScreen
//!
//! Per-screen promotion flow. Each appearance spawns one task that:
//!
//! 1. awaits the fundraising eligibility check (the only suspension point),
//! 2. presents the campaign modal and raises `will_display_fundraising_banner`,
//! 3. runs the feature-announcement gate, which refuses while that flag is up.
//!
//! The task only holds a `Weak` handle to the screen, so a screen torn down
//! while the check is in flight turns the rest of the task into a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use domains::{
    AnalyticsEvent, AnnouncementEvent, CampaignAsset, CampaignModalEvent, LayoutContext,
    WmfProject, YearInReviewAction,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};

use crate::campaign_modal::CampaignModalController;
use crate::eligibility::CampaignEligibilityGate;
use crate::year_in_review::YearInReviewCoordinator;
use crate::{copy, lock, FlowSettings, Services};

/// What a single appearance ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppearanceOutcome {
    /// The screen was gone before the continuation ran.
    ScreenGone,
    FundraisingModal { metrics_id: String },
    FeatureAnnouncement { anchored: bool },
    Nothing,
}

pub struct ArticleScreen {
    services: Services,
    settings: Arc<FlowSettings>,
    gate: Arc<CampaignEligibilityGate>,
    article_url: String,
    project: Option<WmfProject>,
    layout: Mutex<LayoutContext>,
    will_display_fundraising_banner: AtomicBool,
    campaign_modal: Mutex<Option<CampaignModalController>>,
    year_in_review: Mutex<Option<Arc<YearInReviewCoordinator>>>,
}

impl ArticleScreen {
    pub fn new(
        services: Services,
        settings: Arc<FlowSettings>,
        article_url: impl Into<String>,
        project: Option<WmfProject>,
        layout: LayoutContext,
    ) -> Arc<Self> {
        let gate = CampaignEligibilityGate::new(
            Arc::clone(&services.campaigns),
            Arc::clone(&services.announcements),
            Arc::clone(&services.analytics),
        );
        Arc::new(Self {
            services,
            settings,
            gate: Arc::new(gate),
            article_url: article_url.into(),
            project,
            layout: Mutex::new(layout),
            will_display_fundraising_banner: AtomicBool::new(false),
            campaign_modal: Mutex::new(None),
            year_in_review: Mutex::new(None),
        })
    }

    pub fn set_layout(&self, layout: LayoutContext) {
        *lock(&self.layout) = layout;
    }

    pub fn will_display_fundraising_banner(&self) -> bool {
        self.will_display_fundraising_banner.load(Ordering::SeqCst)
    }

    /// Starts the promotion flow for one appearance of the screen.
    pub fn on_appear(self: &Arc<Self>) -> JoinHandle<AppearanceOutcome> {
        self.will_display_fundraising_banner.store(false, Ordering::SeqCst);

        let screen = Arc::downgrade(self);
        let gate = Arc::clone(&self.gate);
        let project = self.project.clone();
        let country_code = self.settings.country_code.clone();
        let now = self.services.clock.now();
        let span = info_span!("article_screen.appear", article = %self.article_url);

        tokio::spawn(
            async move {
                let asset = gate
                    .evaluate_fundraising(&country_code, project.as_ref(), now)
                    .await;
                continue_appearance(screen, asset.ok())
            }
            .instrument(span),
        )
    }

    /// Forwards a modal tap to the presented campaign modal. The returned
    /// task shows the confirmation toast; without a Tokio runtime the toast
    /// is shown before returning.
    pub fn handle_campaign_event(&self, event: CampaignModalEvent) -> Option<JoinHandle<()>> {
        let modal = lock(&self.campaign_modal);
        match modal.as_ref() {
            Some(controller) => controller.handle(event),
            None => {
                debug!(?event, "campaign event without a presented modal");
                None
            }
        }
    }

    pub fn handle_announcement_event(&self, event: AnnouncementEvent) {
        match event {
            AnnouncementEvent::Continue => {
                let coordinator = Arc::new(YearInReviewCoordinator::new(
                    self.services.clone(),
                    Arc::clone(&self.settings),
                ));
                coordinator.start();
                *lock(&self.year_in_review) = Some(coordinator);
                self.services
                    .analytics
                    .log(AnalyticsEvent::FeatureAnnouncementDidTapContinue);
            }
            AnnouncementEvent::Close => {
                self.services
                    .analytics
                    .log(AnalyticsEvent::FeatureAnnouncementDidTapClose);
            }
        }
    }

    pub fn year_in_review(&self) -> Option<Arc<YearInReviewCoordinator>> {
        lock(&self.year_in_review).clone()
    }

    pub fn handle_year_in_review_action(&self, action: YearInReviewAction) {
        match self.year_in_review() {
            Some(coordinator) => coordinator.handle_action(action),
            None => debug!("year in review action without a started deck"),
        }
    }

    fn present_campaign_modal(&self, asset: CampaignAsset) -> String {
        let project = self.project.clone().unwrap_or_else(|| asset.project.clone());
        let controller = CampaignModalController::present(
            self.services.clone(),
            asset,
            project,
            self.article_url.clone(),
            self.settings.toast_delay,
        );
        let metrics_id = controller.asset().metrics_id();
        *lock(&self.campaign_modal) = Some(controller);
        metrics_id
    }

    fn present_announcement_if_needed(&self) -> AppearanceOutcome {
        let layout = *lock(&self.layout);
        let pending = self.will_display_fundraising_banner();

        if let Err(reason) = self
            .gate
            .evaluate_announcement(self.project.as_ref(), &layout, pending)
        {
            debug!(%reason, "feature announcement skipped");
            return AppearanceOutcome::Nothing;
        }

        let anchored = layout.navigation_bar_attached;
        if anchored {
            self.services
                .surface
                .present_feature_announcement(copy::feature_announcement(), layout.announcement_anchor());
            self.services
                .analytics
                .log(AnalyticsEvent::FeatureAnnouncementDidAppear);
        }
        self.services
            .announcements
            .set_has_presented_feature_announcement(true);

        info!(anchored, "feature announcement handled");
        AppearanceOutcome::FeatureAnnouncement { anchored }
    }
}

/// Runs after the fundraising check. Everything here is synchronous, so the
/// banner flag is settled before the announcement gate reads it.
fn continue_appearance(
    screen: Weak<ArticleScreen>,
    asset: Option<CampaignAsset>,
) -> AppearanceOutcome {
    let Some(screen) = screen.upgrade() else {
        debug!("article screen dropped before appearance completed");
        return AppearanceOutcome::ScreenGone;
    };

    if let Some(asset) = asset {
        screen
            .will_display_fundraising_banner
            .store(true, Ordering::SeqCst);
        let metrics_id = screen.present_campaign_modal(asset);
        // The announcement gate still runs; the raised flag makes it refuse.
        screen.present_announcement_if_needed();
        return AppearanceOutcome::FundraisingModal { metrics_id };
    }

    screen.present_announcement_if_needed()
}
