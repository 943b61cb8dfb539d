//! domains
//!
//! Models, port traits and the error taxonomy for the Year-in-Review and
//! fundraising-campaign presentation core.

pub mod analytics;
pub mod error;
pub mod models;
pub mod ports;
pub mod presentation;

// Re-exporting for easier access in other crates
pub use analytics::*;
pub use error::*;
pub use models::*;
pub use ports::*;
pub use presentation::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::{TimeZone, Utc};

    fn asset() -> CampaignAsset {
        CampaignAsset {
            id: "C24_enUS_m_01".into(),
            language_code: "en".into(),
            country_code: "US".into(),
            project: WmfProject::wikipedia("en"),
            start: Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap(),
            text_html: "Please donate".into(),
            footer_html: "Donor policy".into(),
            actions: vec![CampaignAction {
                title: "Donate".into(),
                url: Some("https://donate.example.org".into()),
            }],
        }
    }

    #[test]
    fn metrics_id_joins_language_country_and_asset() {
        assert_eq!(asset().metrics_id(), "enUS_C24_enUS_m_01_iOS");
    }

    #[test]
    fn campaign_window_is_half_open() {
        let asset = asset();
        assert!(asset.is_running_at(asset.start));
        assert!(!asset.is_running_at(asset.end));
    }

    #[test]
    fn entry_count_requires_display_and_integer_payload() {
        let mut entry = ReportSlideEntry {
            id: SlideId::ReadCount,
            display: true,
            data: Some(b"42".to_vec()),
        };
        assert_eq!(entry.displayable_count(), Some(42));

        entry.data = Some(b"\"forty-two\"".to_vec());
        assert_eq!(entry.displayable_count(), None);

        entry.data = Some(b"42".to_vec());
        entry.display = false;
        assert_eq!(entry.displayable_count(), None);
    }

    #[test]
    fn collapsed_bar_only_matters_on_tablets() {
        let mut layout = LayoutContext {
            idiom: DeviceIdiom::Phone,
            navigation_bar_hidden_height: 44.0,
            navigation_bar_attached: true,
            navigation_bar_width: 390.0,
            safe_area_top: 47.0,
            bar_top_spacing: 0.0,
        };
        assert!(!layout.is_collapsed_tablet_bar());
        layout.idiom = DeviceIdiom::Pad;
        assert!(layout.is_collapsed_tablet_bar());

        let anchor = layout.announcement_anchor();
        assert_eq!((anchor.x, anchor.y), (290.0, 62.0));
    }
}
