//! # SlideContentResolver
//!
//! Builds the four-slide Year-in-Review sequence, swapping in personalized
//! slides where the report allows it. Never fails: any problem obtaining
//! or decoding the report degrades to the collective base slides.

use domains::{Report, ReportStore, SlideContent, SlideId};
use tracing::{debug, warn};

use crate::copy::{self, CollectiveStats};

/// Number of slides in every resolved deck.
pub const SLIDE_COUNT: usize = 4;

pub mod logging_ids {
    pub const READ_COUNT_BASE: &str = "read_count_base";
    pub const READ_COUNT_CUSTOM: &str = "read_count_custom";
    pub const READ_VIEW_BASE: &str = "read_view_base";
    pub const EDIT_COUNT_BASE: &str = "edit_count_base";
    pub const EDIT_COUNT_CUSTOM: &str = "edit_count_custom";
    pub const EDIT_RATE_BASE: &str = "edit_rate_base";
}

const READING_IMAGE: &str = "heart_yir";
const VIEWS_IMAGE: &str = "phone_yir";
const EDITING_IMAGE: &str = "languages_yir";
const EDIT_RATE_IMAGE: &str = "edit_yir";

#[derive(Debug, Clone, Default)]
pub struct SlideContentResolver {
    stats: CollectiveStats,
}

impl SlideContentResolver {
    pub fn new(stats: CollectiveStats) -> Self {
        Self { stats }
    }

    /// Fetches the report for `year` and resolves it. A store failure yields
    /// the base deck.
    pub fn resolve_from_store(&self, store: &dyn ReportStore, year: i32) -> [SlideContent; SLIDE_COUNT] {
        match store.fetch_report(year) {
            Ok(report) => self.resolve(Some(&report)),
            Err(err) => {
                warn!(year, error = %err, "year in review report unavailable, using base slides");
                self.resolve(None)
            }
        }
    }

    /// Ordered as `[reading, views, editing, edit rate]`.
    pub fn resolve(&self, report: Option<&Report>) -> [SlideContent; SLIDE_COUNT] {
        let mut read_count = None;
        let mut edit_count = None;

        for entry in report.map(|r| r.slides.as_slice()).unwrap_or_default() {
            let Some(count) = entry.displayable_count() else {
                debug!(slide = ?entry.id, display = entry.display, "keeping base slide");
                continue;
            };
            match entry.id {
                SlideId::ReadCount => read_count = Some(count),
                SlideId::EditCount => edit_count = Some(count),
            }
        }

        [
            read_count.map_or_else(|| self.base_reading(), |n| self.personalized_reading(n)),
            self.base_views(),
            edit_count.map_or_else(|| self.base_editing(), personalized_editing),
            self.base_edit_rate(),
        ]
    }

    fn base_reading(&self) -> SlideContent {
        slide(
            READING_IMAGE,
            copy::base_reading_title(),
            copy::base_reading_subtitle(&self.stats),
            logging_ids::READ_COUNT_BASE,
        )
    }

    fn personalized_reading(&self, read_count: i64) -> SlideContent {
        slide(
            READING_IMAGE,
            copy::personalized_reading_title(read_count),
            copy::personalized_reading_subtitle(read_count, &self.stats),
            logging_ids::READ_COUNT_CUSTOM,
        )
    }

    fn base_views(&self) -> SlideContent {
        slide(
            VIEWS_IMAGE,
            copy::base_viewed_title(&self.stats),
            copy::base_viewed_subtitle(&self.stats),
            logging_ids::READ_VIEW_BASE,
        )
    }

    fn base_editing(&self) -> SlideContent {
        slide(
            EDITING_IMAGE,
            copy::base_editors_title(&self.stats),
            copy::base_editors_subtitle(&self.stats),
            logging_ids::EDIT_COUNT_BASE,
        )
    }

    fn base_edit_rate(&self) -> SlideContent {
        slide(
            EDIT_RATE_IMAGE,
            copy::base_edit_rate_title(&self.stats),
            copy::base_edit_rate_subtitle(&self.stats),
            logging_ids::EDIT_RATE_BASE,
        )
    }
}

fn personalized_editing(edit_count: i64) -> SlideContent {
    slide(
        EDITING_IMAGE,
        copy::personalized_editing_title(edit_count),
        copy::personalized_editing_subtitle(edit_count),
        logging_ids::EDIT_COUNT_CUSTOM,
    )
}

fn slide(image_name: &str, title: String, subtitle: String, logging_id: &str) -> SlideContent {
    SlideContent {
        image_name: image_name.to_string(),
        title,
        information_bubble_text: None,
        subtitle,
        logging_id: logging_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::{DomainError, MockReportStore, ReportSlideEntry};

    fn entry(id: SlideId, display: bool, payload: &str) -> ReportSlideEntry {
        ReportSlideEntry {
            id,
            display,
            data: Some(payload.as_bytes().to_vec()),
        }
    }

    fn report(slides: Vec<ReportSlideEntry>) -> Report {
        Report { year: 2024, slides }
    }

    fn ids(slides: &[SlideContent]) -> Vec<&str> {
        slides.iter().map(|s| s.logging_id.as_str()).collect()
    }

    #[test]
    fn empty_report_keeps_every_base_slide() {
        let resolver = SlideContentResolver::default();
        let slides = resolver.resolve(Some(&report(vec![])));
        assert_eq!(
            ids(&slides),
            ["read_count_base", "read_view_base", "edit_count_base", "edit_rate_base"]
        );
        assert_eq!(slides, resolver.resolve(None));
    }

    #[test]
    fn personalizes_reading_and_editing_in_place() {
        let resolver = SlideContentResolver::default();
        let slides = resolver.resolve(Some(&report(vec![
            entry(SlideId::EditCount, true, "3"),
            entry(SlideId::ReadCount, true, "1"),
        ])));

        assert_eq!(
            ids(&slides),
            ["read_count_custom", "read_view_base", "edit_count_custom", "edit_rate_base"]
        );
        assert_eq!(slides[0].title, "You read 1 article this year");
        assert_eq!(slides[0].image_name, "heart_yir");
        assert_eq!(slides[2].title, "You edited Wikipedia 3 times");
        assert_eq!(slides[2].image_name, "languages_yir");
    }

    #[test]
    fn large_edit_counts_use_the_capped_copy() {
        let resolver = SlideContentResolver::default();
        let slides = resolver.resolve(Some(&report(vec![entry(SlideId::EditCount, true, "750")])));

        assert_eq!(slides[2].logging_id, "edit_count_custom");
        assert_eq!(slides[2].title, "You edited Wikipedia 500+ times");
        assert!(!slides[2].subtitle.contains("750"));
    }

    #[test]
    fn hidden_or_undecodable_entries_fall_back_silently() {
        let resolver = SlideContentResolver::default();
        let slides = resolver.resolve(Some(&report(vec![
            entry(SlideId::ReadCount, false, "12"),
            entry(SlideId::EditCount, true, "{\"count\": 12}"),
        ])));
        assert_eq!(slides, resolver.resolve(None));

        let no_payload = ReportSlideEntry {
            id: SlideId::ReadCount,
            display: true,
            data: None,
        };
        assert_eq!(resolver.resolve(Some(&report(vec![no_payload]))), resolver.resolve(None));
    }

    #[test]
    fn resolving_twice_gives_the_same_deck() {
        let resolver = SlideContentResolver::default();
        let input = report(vec![entry(SlideId::ReadCount, true, "88")]);
        let snapshot = input.clone();

        let first = resolver.resolve(Some(&input));
        let second = resolver.resolve(Some(&input));

        assert_eq!(first, second);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn store_failure_yields_base_deck() {
        let mut store = MockReportStore::new();
        store
            .expect_fetch_report()
            .withf(|year| *year == 2024)
            .times(1)
            .returning(|_| Err(DomainError::DataUnavailable("no report".into())));

        let slides = SlideContentResolver::default().resolve_from_store(&store, 2024);
        assert_eq!(
            ids(&slides),
            ["read_count_base", "read_view_base", "edit_count_base", "edit_rate_base"]
        );
    }
}
