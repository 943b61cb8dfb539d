//! Analytics events emitted by the campaign and Year-in-Review flows.
//!
//! Every event is keyed by `(surface, action, correlation id)` where the
//! correlation id is either an asset metrics id or a slide logging id.

use serde::{Deserialize, Serialize};

use crate::models::WmfProject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    ArticleBanner,
    CampaignModal,
    ArticleToast,
    YearInReview,
    FeatureAnnouncement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    /// An eligible asset was suppressed because the viewer is not opted in.
    HiddenBanner { project: WmfProject, metrics_id: String },
    CampaignModalImpression { project: WmfProject, metrics_id: String },
    CampaignModalDidTapDonate { project: WmfProject, metrics_id: String },
    CampaignModalDidTapMaybeLater { project: WmfProject, metrics_id: String },
    CampaignModalDidTapAlreadyDonated { project: WmfProject, metrics_id: String },
    CampaignModalDidTapDonorPolicy { project: WmfProject, metrics_id: String },
    CampaignModalDidTapClose { project: WmfProject, metrics_id: String },
    ArticleDidSeeReminderToast { project: WmfProject, metrics_id: String },
    YearInReviewSlideImpression { slide_logging_id: String },
    YearInReviewDidTapNext { slide_logging_id: String },
    YearInReviewDidTapDone { slide_logging_id: String },
    YearInReviewDidTapDonate { slide_logging_id: String, metrics_id: String },
    YearInReviewDidTapIntroContinue,
    YearInReviewDidTapIntroDisable,
    FeatureAnnouncementDidAppear,
    FeatureAnnouncementDidTapContinue,
    FeatureAnnouncementDidTapClose,
}

impl AnalyticsEvent {
    pub fn surface(&self) -> Surface {
        match self {
            Self::HiddenBanner { .. } => Surface::ArticleBanner,
            Self::CampaignModalImpression { .. }
            | Self::CampaignModalDidTapDonate { .. }
            | Self::CampaignModalDidTapMaybeLater { .. }
            | Self::CampaignModalDidTapAlreadyDonated { .. }
            | Self::CampaignModalDidTapDonorPolicy { .. }
            | Self::CampaignModalDidTapClose { .. } => Surface::CampaignModal,
            Self::ArticleDidSeeReminderToast { .. } => Surface::ArticleToast,
            Self::YearInReviewSlideImpression { .. }
            | Self::YearInReviewDidTapNext { .. }
            | Self::YearInReviewDidTapDone { .. }
            | Self::YearInReviewDidTapDonate { .. }
            | Self::YearInReviewDidTapIntroContinue
            | Self::YearInReviewDidTapIntroDisable => Surface::YearInReview,
            Self::FeatureAnnouncementDidAppear
            | Self::FeatureAnnouncementDidTapContinue
            | Self::FeatureAnnouncementDidTapClose => Surface::FeatureAnnouncement,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::HiddenBanner { .. } => "hidden",
            Self::CampaignModalImpression { .. } | Self::YearInReviewSlideImpression { .. } => {
                "impression"
            }
            Self::CampaignModalDidTapDonate { .. } | Self::YearInReviewDidTapDonate { .. } => {
                "donate_click"
            }
            Self::CampaignModalDidTapMaybeLater { .. } => "later_click",
            Self::CampaignModalDidTapAlreadyDonated { .. } => "already_donated_click",
            Self::CampaignModalDidTapDonorPolicy { .. } => "donor_policy_click",
            Self::CampaignModalDidTapClose { .. } | Self::FeatureAnnouncementDidTapClose => {
                "close_click"
            }
            Self::ArticleDidSeeReminderToast { .. } => "reminder_toast",
            Self::YearInReviewDidTapNext { .. } => "next_click",
            Self::YearInReviewDidTapDone { .. } => "done_click",
            Self::YearInReviewDidTapIntroContinue | Self::FeatureAnnouncementDidTapContinue => {
                "continue_click"
            }
            Self::YearInReviewDidTapIntroDisable => "disable_click",
            Self::FeatureAnnouncementDidAppear => "impression",
        }
    }

    /// Metrics id or slide logging id, when the event carries one.
    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            Self::HiddenBanner { metrics_id, .. }
            | Self::CampaignModalImpression { metrics_id, .. }
            | Self::CampaignModalDidTapDonate { metrics_id, .. }
            | Self::CampaignModalDidTapMaybeLater { metrics_id, .. }
            | Self::CampaignModalDidTapAlreadyDonated { metrics_id, .. }
            | Self::CampaignModalDidTapDonorPolicy { metrics_id, .. }
            | Self::CampaignModalDidTapClose { metrics_id, .. }
            | Self::ArticleDidSeeReminderToast { metrics_id, .. } => Some(metrics_id),
            Self::YearInReviewSlideImpression { slide_logging_id }
            | Self::YearInReviewDidTapNext { slide_logging_id }
            | Self::YearInReviewDidTapDone { slide_logging_id }
            | Self::YearInReviewDidTapDonate { slide_logging_id, .. } => Some(slide_logging_id),
            Self::YearInReviewDidTapIntroContinue
            | Self::YearInReviewDidTapIntroDisable
            | Self::FeatureAnnouncementDidAppear
            | Self::FeatureAnnouncementDidTapContinue
            | Self::FeatureAnnouncementDidTapClose => None,
        }
    }
}
