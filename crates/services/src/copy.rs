//! English display copy for the deck, the campaign toasts and the feature
//! announcement. Localization infrastructure lives outside the core; these
//! are the source-language strings.

use domains::{FeatureAnnouncement, Toast, YearInReviewStrings};
use serde::{Deserialize, Serialize};

/// Edit counts at or above this value are shown as "500+".
pub const EDIT_COUNT_CAP: i64 = 500;

/// Collective numbers inserted into the base slides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectiveStats {
    pub num_articles: String,
    pub num_languages: String,
    pub num_views: String,
    pub num_edits: String,
    pub num_edits_per_minute: String,
}

impl Default for CollectiveStats {
    fn default() -> Self {
        Self {
            num_articles: "63.69 million articles".into(),
            num_languages: "332 active languages".into(),
            num_views: "1.4 billion times".into(),
            num_edits: "460,300 edits".into(),
            num_edits_per_minute: "342 edits per minute".into(),
        }
    }
}

/// English plural rule: exactly one takes the singular.
fn plural(count: i64, one: &str, other: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {other}")
    }
}

pub(crate) fn base_reading_title() -> String {
    "Reading brought us together".to_string()
}

pub(crate) fn base_reading_subtitle(stats: &CollectiveStats) -> String {
    format!(
        "Wikipedia had {} across over {} this year. You joined millions in expanding knowledge and exploring diverse topics.",
        stats.num_articles, stats.num_languages
    )
}

pub(crate) fn base_viewed_title(stats: &CollectiveStats) -> String {
    format!("We have viewed Wikipedia articles {}.", stats.num_views)
}

pub(crate) fn base_viewed_subtitle(stats: &CollectiveStats) -> String {
    format!(
        "iOS app users have viewed Wikipedia articles {}. For people around the world, Wikipedia is the first stop when answering a question, looking up information for school or work, or learning a new fact.",
        stats.num_views
    )
}

pub(crate) fn base_editors_title(stats: &CollectiveStats) -> String {
    format!("Editors on the iOS app made more than {}", stats.num_edits)
}

pub(crate) fn base_editors_subtitle(stats: &CollectiveStats) -> String {
    format!(
        "Wikipedia's community of volunteer editors made more than {} on the iOS app so far this year. The heart and soul of Wikipedia is our global community of volunteer contributors, donors, and billions of readers like yourself – all united to share unlimited access to reliable information.",
        stats.num_edits
    )
}

pub(crate) fn base_edit_rate_title(stats: &CollectiveStats) -> String {
    format!("Wikipedia was edited {}", stats.num_edits_per_minute)
}

pub(crate) fn base_edit_rate_subtitle(stats: &CollectiveStats) -> String {
    format!(
        "This year, Wikipedia was edited at an average rate of {}. Articles are collaboratively created and improved using reliable sources. Each edit plays a crucial role in improving and expanding Wikipedia.",
        stats.num_edits_per_minute
    )
}

pub(crate) fn personalized_reading_title(read_count: i64) -> String {
    format!("You read {} this year", plural(read_count, "article", "articles"))
}

pub(crate) fn personalized_reading_subtitle(read_count: i64, stats: &CollectiveStats) -> String {
    format!(
        "You read {} this year. This year Wikipedia had {} available across over {} this year. You joined millions in expanding knowledge and exploring diverse topics.",
        plural(read_count, "article", "articles"),
        stats.num_articles,
        stats.num_languages
    )
}

pub(crate) fn personalized_editing_title(edit_count: i64) -> String {
    if edit_count >= EDIT_COUNT_CAP {
        return "You edited Wikipedia 500+ times".to_string();
    }
    format!("You edited Wikipedia {}", plural(edit_count, "time", "times"))
}

pub(crate) fn personalized_editing_subtitle(edit_count: i64) -> String {
    const THANKS: &str = "Thank you for being one of the volunteer editors making a difference on Wikimedia projects around the world.";
    if edit_count >= EDIT_COUNT_CAP {
        return format!("You edited Wikipedia 500+ times. {THANKS}");
    }
    format!(
        "You edited Wikipedia {}. {THANKS}",
        plural(edit_count, "time", "times")
    )
}

pub(crate) fn year_in_review_strings() -> YearInReviewStrings {
    YearInReviewStrings {
        donate_button_title: "Donate".into(),
        done_button_title: "Done".into(),
        share_button_title: "Share".into(),
        next_button_title: "Next".into(),
        intro_title: "Explore your Wikipedia Year in Review".into(),
        intro_subtitle: "See insights about which articles you read on the Wikipedia app and the edits you made. Share your journey and discover what stood out for you this year. Your reading history is kept protected. Reading insights are calculated using locally stored data on your device.".into(),
        intro_cta: "Get Started".into(),
        intro_hide: "Hide this feature".into(),
        share_text: "Here's my Wikipedia year in review. Created with the Wikipedia iOS app".into(),
        username_title: "User".into(),
    }
}

pub(crate) fn feature_announcement() -> FeatureAnnouncement {
    FeatureAnnouncement {
        title: "Try 'Year in Review'".into(),
        body: "See insights about which articles you read on the Wikipedia app and the edits you made. Your reading history is kept protected.".into(),
        primary_button_title: "Continue".into(),
        image_name: "wikipedia-globe".into(),
    }
}

pub(crate) fn maybe_later_toast() -> Toast {
    Toast {
        title: "We will remind you again tomorrow.".into(),
        image_name: "checkmark.circle.fill".into(),
    }
}

pub(crate) fn already_donated_toast() -> Toast {
    Toast {
        title: "Thank you, dear donor! Your generosity helps keep Wikipedia and its sister sites thriving.".into(),
        image_name: "checkmark.circle.fill".into(),
    }
}
