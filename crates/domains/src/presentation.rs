//! # Presentation contracts
//!
//! View models handed to the `PresentationSurface` port, and the closed sets
//! of user interactions the surface reports back. Each interaction enum is
//! dispatched through a single handler function on the owning service.

use serde::{Deserialize, Serialize};

use crate::models::{CampaignAsset, Rect, SlideContent, WmfProject};

/// Button and intro copy for the Year-in-Review deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearInReviewStrings {
    pub donate_button_title: String,
    pub done_button_title: String,
    pub share_button_title: String,
    pub next_button_title: String,
    pub intro_title: String,
    pub intro_subtitle: String,
    pub intro_cta: String,
    pub intro_hide: String,
    pub share_text: String,
    pub username_title: String,
}

/// Everything the deck needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearInReviewDeck {
    pub strings: YearInReviewStrings,
    pub slides: Vec<SlideContent>,
    pub username: Option<String>,
    pub share_link: String,
    pub hashtag: String,
}

/// Delegate messages from the deck.
#[derive(Debug, Clone, PartialEq)]
pub enum YearInReviewAction {
    Donate { source_rect: Rect, slide_logging_id: String },
    Share { image: ShareImage },
}

/// Rendered slide snapshot, opaque to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareImage(pub Vec<u8>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityType {
    Print,
    AssignToContact,
    AddToReadingList,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareSheet {
    pub image: ShareImage,
    pub text: String,
    pub excluded_activities: Vec<ActivityType>,
}

/// Fundraising modal built from an eligible asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignModal {
    pub asset: CampaignAsset,
    pub project: WmfProject,
    pub show_maybe_later: bool,
}

/// How the campaign modal went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissAction {
    TappedClose,
    TappedPrimary,
    TappedSecondary,
    TappedOptional,
    Swiped,
}

/// Interactions reported by the campaign modal.
#[derive(Debug, Clone, PartialEq)]
pub enum CampaignModalEvent {
    /// Primary button; `button` is the button frame in screen coordinates.
    Donate { button: Rect },
    /// Secondary button: "maybe later" or, when that is not offered,
    /// "already donated".
    MaybeLater,
    AlreadyDonated,
    DonorPolicy { url: String },
    Dismissed(DismissAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAnnouncement {
    pub title: String,
    pub body: String,
    pub primary_button_title: String,
    pub image_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnouncementEvent {
    Continue,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub title: String,
    pub image_name: String,
}

/// Where a donation flow was started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonateSource {
    YearInReview,
    ArticleCampaignModal {
        article_url: String,
        metrics_id: String,
        donate_url: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonateRequest {
    pub source: DonateSource,
    /// Donate button frame in screen coordinates
    pub button_rect: Rect,
}
