//! # CampaignModalController
//!
//! Owns one presented fundraising modal and turns its button taps into
//! analytics events, asset state transitions and confirmation toasts.
//!
//! | tap                         | asset state            |
//! |-----------------------------|------------------------|
//! | donate                      | permanently hidden     |
//! | maybe later (offered)       | maybe later at `now`   |
//! | maybe later (not offered)   | permanently hidden     |
//! | already donated             | permanently hidden     |
//! | close                       | permanently hidden     |

use std::sync::Arc;
use std::time::Duration;

use domains::{
    AnalyticsEvent, CampaignAsset, CampaignModal, CampaignModalEvent, DismissAction,
    DonateRequest, DonateSource, Rect, Toast, WmfProject,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{copy, Services};

pub struct CampaignModalController {
    services: Services,
    asset: CampaignAsset,
    project: WmfProject,
    article_url: String,
    show_maybe_later: bool,
    toast_delay: Duration,
}

impl CampaignModalController {
    /// Logs the impression and hands the modal to the presentation surface.
    pub fn present(
        services: Services,
        asset: CampaignAsset,
        project: WmfProject,
        article_url: String,
        toast_delay: Duration,
    ) -> Self {
        let metrics_id = asset.metrics_id();
        services.analytics.log(AnalyticsEvent::CampaignModalImpression {
            project: project.clone(),
            metrics_id: metrics_id.clone(),
        });

        let show_maybe_later = services
            .campaigns
            .should_show_maybe_later_option(&asset, services.clock.now());

        info!(%metrics_id, show_maybe_later, "presenting campaign modal");
        services.surface.present_campaign_modal(CampaignModal {
            asset: asset.clone(),
            project: project.clone(),
            show_maybe_later,
        });

        Self {
            services,
            asset,
            project,
            article_url,
            show_maybe_later,
            toast_delay,
        }
    }

    pub fn asset(&self) -> &CampaignAsset {
        &self.asset
    }

    pub fn shows_maybe_later(&self) -> bool {
        self.show_maybe_later
    }

    /// Returns the pending toast task when the tap schedules one. Without a
    /// Tokio runtime the toast is shown synchronously and `None` is returned.
    pub fn handle(&self, event: CampaignModalEvent) -> Option<JoinHandle<()>> {
        let metrics_id = self.asset.metrics_id();
        debug!(%metrics_id, ?event, "campaign modal event");

        match event {
            CampaignModalEvent::Donate { button } => {
                self.log(|project, metrics_id| AnalyticsEvent::CampaignModalDidTapDonate {
                    project,
                    metrics_id,
                });
                self.start_donation(button);
                None
            }
            CampaignModalEvent::MaybeLater => {
                self.log(|project, metrics_id| AnalyticsEvent::CampaignModalDidTapMaybeLater {
                    project,
                    metrics_id,
                });
                if self.show_maybe_later {
                    let now = self.services.clock.now();
                    self.services.campaigns.mark_asset_as_maybe_later(&self.asset, now);
                    let reminder = AnalyticsEvent::ArticleDidSeeReminderToast {
                        project: self.project.clone(),
                        metrics_id,
                    };
                    self.schedule_toast(copy::maybe_later_toast(), Some(reminder))
                } else {
                    self.already_donated()
                }
            }
            CampaignModalEvent::AlreadyDonated => self.already_donated(),
            CampaignModalEvent::DonorPolicy { url } => {
                self.log(|project, metrics_id| AnalyticsEvent::CampaignModalDidTapDonorPolicy {
                    project,
                    metrics_id,
                });
                self.services.surface.open_url(&url, true);
                None
            }
            CampaignModalEvent::Dismissed(DismissAction::TappedClose) => {
                self.log(|project, metrics_id| AnalyticsEvent::CampaignModalDidTapClose {
                    project,
                    metrics_id,
                });
                self.services.campaigns.mark_asset_as_permanently_hidden(&self.asset);
                None
            }
            CampaignModalEvent::Dismissed(_) => None,
        }
    }

    fn start_donation(&self, button: Rect) {
        // Without a donate URL the tap is logged but the asset stays eligible.
        let Some(donate_url) = self.asset.donate_url() else {
            debug!(metrics_id = %self.asset.metrics_id(), "campaign asset has no donate url");
            return;
        };

        self.services.donation.start(DonateRequest {
            source: DonateSource::ArticleCampaignModal {
                article_url: self.article_url.clone(),
                metrics_id: self.asset.metrics_id(),
                donate_url: donate_url.to_string(),
            },
            button_rect: button,
        });
        self.services.campaigns.mark_asset_as_permanently_hidden(&self.asset);
    }

    fn already_donated(&self) -> Option<JoinHandle<()>> {
        self.log(|project, metrics_id| AnalyticsEvent::CampaignModalDidTapAlreadyDonated {
            project,
            metrics_id,
        });
        let handle = self.schedule_toast(copy::already_donated_toast(), None);
        self.services.campaigns.mark_asset_as_permanently_hidden(&self.asset);
        handle
    }

    /// Outside a Tokio runtime the toast is shown immediately and no task is
    /// returned.
    fn schedule_toast(&self, toast: Toast, seen: Option<AnalyticsEvent>) -> Option<JoinHandle<()>> {
        let analytics = Arc::clone(&self.services.analytics);
        let surface = Arc::clone(&self.services.surface);
        let show = move || {
            if let Some(event) = seen {
                analytics.log(event);
            }
            surface.show_toast(toast);
        };

        let Ok(runtime) = Handle::try_current() else {
            debug!("no async runtime, showing toast without delay");
            show();
            return None;
        };

        let delay = self.toast_delay;
        Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            show();
        }))
    }

    fn log(&self, event: impl FnOnce(WmfProject, String) -> AnalyticsEvent) {
        self.services
            .analytics
            .log(event(self.project.clone(), self.asset.metrics_id()));
    }
}
