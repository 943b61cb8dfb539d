//! # Domain Models
//!
//! Value types shared by the Year-in-Review resolver and the campaign gates.
//! Reports and campaign assets are written by external processes; the core
//! only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metric tracked per reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideId {
    ReadCount,
    EditCount,
}

/// One tracked metric inside a yearly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSlideEntry {
    pub id: SlideId,
    /// Whether personalization data may be shown for this metric
    pub display: bool,
    /// JSON-encoded payload; for count metrics it decodes to an integer
    #[serde(default)]
    pub data: Option<Vec<u8>>,
}

impl ReportSlideEntry {
    /// Returns the personalized count when the entry may be displayed and its
    /// payload decodes to an integer.
    pub fn displayable_count(&self) -> Option<i64> {
        if !self.display {
            return None;
        }
        let data = self.data.as_deref()?;
        serde_json::from_slice::<i64>(data).ok()
    }
}

/// Aggregated statistics for a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub year: i32,
    #[serde(default)]
    pub slides: Vec<ReportSlideEntry>,
}

/// One page of the Year-in-Review deck. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub image_name: String,
    pub title: String,
    pub information_bubble_text: Option<String>,
    pub subtitle: String,
    /// Stable identifier correlating the slide with analytics events
    pub logging_id: String,
}

/// Wikimedia project a screen or campaign belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WmfProject {
    Wikipedia { language_code: String },
    Commons,
    Wikidata,
}

impl WmfProject {
    pub fn wikipedia(language_code: impl Into<String>) -> Self {
        Self::Wikipedia {
            language_code: language_code.into(),
        }
    }

    pub fn language_code(&self) -> Option<&str> {
        match self {
            Self::Wikipedia { language_code } => Some(language_code),
            Self::Commons | Self::Wikidata => None,
        }
    }

    /// Short identifier used in log fields and analytics payloads.
    pub fn id(&self) -> String {
        match self {
            Self::Wikipedia { language_code } => format!("wikipedia~{language_code}"),
            Self::Commons => "commons".to_string(),
            Self::Wikidata => "wikidata".to_string(),
        }
    }
}

/// A button on the campaign modal. The first action is the donate action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignAction {
    pub title: String,
    pub url: Option<String>,
}

/// A fundraising campaign configuration scoped to language, country and a
/// date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignAsset {
    pub id: String,
    pub language_code: String,
    pub country_code: String,
    pub project: WmfProject,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub text_html: String,
    pub footer_html: String,
    pub actions: Vec<CampaignAction>,
}

impl CampaignAsset {
    /// Identifier correlating impressions and taps with this asset.
    pub fn metrics_id(&self) -> String {
        format!("{}{}_{}_iOS", self.language_code, self.country_code, self.id)
    }

    pub fn donate_url(&self) -> Option<&str> {
        self.actions.first().and_then(|action| action.url.as_deref())
    }

    /// True when `now` falls inside the campaign window (inclusive start,
    /// exclusive end).
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceIdiom {
    Phone,
    Pad,
}

/// Layout state of the host screen at the time of the announcement check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutContext {
    pub idiom: DeviceIdiom,
    /// Height by which the navigation bar is currently collapsed
    pub navigation_bar_hidden_height: f64,
    /// Whether the navigation bar is in the view hierarchy
    pub navigation_bar_attached: bool,
    pub navigation_bar_width: f64,
    pub safe_area_top: f64,
    pub bar_top_spacing: f64,
}

impl LayoutContext {
    /// Tablets with a collapsed bar have nothing to anchor the popover to.
    pub fn is_collapsed_tablet_bar(&self) -> bool {
        self.idiom == DeviceIdiom::Pad && self.navigation_bar_hidden_height > 0.0
    }

    /// Anchor for the feature announcement popover, near the trailing edge
    /// of the navigation bar.
    pub fn announcement_anchor(&self) -> Rect {
        Rect {
            x: self.navigation_bar_width - 100.0,
            y: self.safe_area_top + self.bar_top_spacing + 15.0,
            width: 30.0,
            height: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
