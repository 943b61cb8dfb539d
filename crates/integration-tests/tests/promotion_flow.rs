//! One article-screen appearance end to end: fundraising check, feature
//! announcement, and the Year-in-Review deck it leads to.

use domains::{
    ActivityType, AnalyticsEvent, AnnouncementEvent, AnnouncementFlagStore, DeviceIdiom, Rect,
    ShareImage, SlideId, YearInReviewAction,
};
use integration_tests::*;
use services::slides::logging_ids;
use services::AppearanceOutcome;
use storage_adapters::Presented;

#[tokio::test]
async fn fundraising_modal_suppresses_the_announcement() -> anyhow::Result<()> {
    let h = Harness::new()
        .with_campaign(campaign("C24_enUS_m_01", at(30, 0)))
        .with_announcement();
    let screen = h.screen(phone());

    let outcome = screen.on_appear().await?;

    assert_eq!(
        outcome,
        AppearanceOutcome::FundraisingModal {
            metrics_id: "enUS_C24_enUS_m_01_iOS".into()
        }
    );
    assert!(screen.will_display_fundraising_banner());
    assert_eq!(h.campaign_modals(), 1);
    assert_eq!(h.announcements_shown(), 0);
    // Still owed to the user on a later appearance.
    assert!(!h.announcements.has_presented_feature_announcement());
    assert!(h.events().contains(&AnalyticsEvent::CampaignModalImpression {
        project: en(),
        metrics_id: "enUS_C24_enUS_m_01_iOS".into(),
    }));
    Ok(())
}

#[tokio::test]
async fn viewer_not_opted_in_gets_the_announcement_instead() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    h.campaigns.insert_asset(campaign("C24_enUS_m_01", at(30, 0)));
    let screen = h.screen(phone());

    let outcome = screen.on_appear().await?;

    assert_eq!(outcome, AppearanceOutcome::FeatureAnnouncement { anchored: true });
    assert!(!screen.will_display_fundraising_banner());
    assert_eq!(h.campaign_modals(), 0);
    assert_eq!(
        h.events(),
        vec![
            AnalyticsEvent::HiddenBanner {
                project: en(),
                metrics_id: "enUS_C24_enUS_m_01_iOS".into(),
            },
            AnalyticsEvent::FeatureAnnouncementDidAppear,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn announcement_is_anchored_under_the_navigation_bar() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    let layout = domains::LayoutContext {
        bar_top_spacing: 8.0,
        ..phone()
    };

    h.screen(layout).on_appear().await?;

    let anchors: Vec<Rect> = h
        .surface
        .presented()
        .into_iter()
        .filter_map(|p| match p {
            Presented::FeatureAnnouncement { anchor, .. } => Some(anchor),
            _ => None,
        })
        .collect();
    assert_eq!(
        anchors,
        vec![Rect {
            x: 290.0,
            y: 70.0,
            width: 30.0,
            height: 30.0
        }]
    );
    Ok(())
}

#[tokio::test]
async fn announcement_is_shown_once() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    let screen = h.screen(phone());

    assert_eq!(
        screen.on_appear().await?,
        AppearanceOutcome::FeatureAnnouncement { anchored: true }
    );
    assert_eq!(screen.on_appear().await?, AppearanceOutcome::Nothing);
    assert_eq!(h.screen(phone()).on_appear().await?, AppearanceOutcome::Nothing);

    assert_eq!(h.announcements_shown(), 1);
    Ok(())
}

#[tokio::test]
async fn collapsed_tablet_bar_defers_the_announcement() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    let collapsed = domains::LayoutContext {
        idiom: DeviceIdiom::Pad,
        navigation_bar_hidden_height: 44.0,
        ..phone()
    };
    let screen = h.screen(collapsed);

    assert_eq!(screen.on_appear().await?, AppearanceOutcome::Nothing);
    assert!(!h.announcements.has_presented_feature_announcement());

    screen.set_layout(domains::LayoutContext {
        idiom: DeviceIdiom::Pad,
        ..phone()
    });
    assert_eq!(
        screen.on_appear().await?,
        AppearanceOutcome::FeatureAnnouncement { anchored: true }
    );
    Ok(())
}

#[tokio::test]
async fn detached_bar_consumes_the_announcement_without_showing_it() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    let detached = domains::LayoutContext {
        navigation_bar_attached: false,
        ..phone()
    };

    let outcome = h.screen(detached).on_appear().await?;

    assert_eq!(outcome, AppearanceOutcome::FeatureAnnouncement { anchored: false });
    assert_eq!(h.announcements_shown(), 0);
    assert!(h.announcements.has_presented_feature_announcement());
    assert!(h.events().is_empty());
    Ok(())
}

#[tokio::test]
async fn screen_dropped_mid_check_presents_nothing() -> anyhow::Result<()> {
    let h = Harness::new()
        .with_campaign(campaign("C24_enUS_m_01", at(30, 0)))
        .with_announcement();
    let screen = h.screen(phone());

    // The current-thread runtime has not polled the task yet.
    let appearance = screen.on_appear();
    drop(screen);

    assert_eq!(appearance.await?, AppearanceOutcome::ScreenGone);
    assert!(h.surface.presented().is_empty());
    Ok(())
}

#[tokio::test]
async fn continue_opens_a_personalized_deck_and_shares_it() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    h.reports.insert(report(
        2024,
        vec![
            slide(SlideId::ReadCount, serde_json::json!(187)),
            slide(SlideId::EditCount, serde_json::json!(750)),
        ],
    ));
    let screen = h.screen(phone());
    screen.on_appear().await?;

    screen.handle_announcement_event(AnnouncementEvent::Continue);

    let coordinator = screen.year_in_review().expect("deck started");
    let deck = coordinator.deck().expect("deck resolved");
    let ids: Vec<&str> = deck.slides.iter().map(|s| s.logging_id.as_str()).collect();
    assert_eq!(
        ids,
        [
            logging_ids::READ_COUNT_CUSTOM,
            logging_ids::READ_VIEW_BASE,
            logging_ids::EDIT_COUNT_CUSTOM,
            logging_ids::EDIT_RATE_BASE,
        ]
    );
    assert_eq!(deck.slides[0].title, "You read 187 articles this year");
    assert_eq!(deck.slides[2].title, "You edited Wikipedia 500+ times");

    screen.handle_year_in_review_action(YearInReviewAction::Share {
        image: ShareImage(vec![0x89, 0x50, 0x4e, 0x47]),
    });
    let sheet = h
        .surface
        .presented()
        .into_iter()
        .find_map(|p| match p {
            Presented::ShareSheet(sheet) => Some(sheet),
            _ => None,
        })
        .expect("share sheet presented");
    assert!(sheet.text.ends_with(&format!("({})#WikipediaYearInReview", h.settings.share_link)));
    assert_eq!(
        sheet.excluded_activities,
        vec![
            ActivityType::Print,
            ActivityType::AssignToContact,
            ActivityType::AddToReadingList
        ]
    );

    assert!(h
        .events()
        .ends_with(&[AnalyticsEvent::FeatureAnnouncementDidTapContinue]));
    Ok(())
}

#[tokio::test]
async fn donating_from_the_deck_tags_the_slide() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    let screen = h.screen(phone());
    screen.on_appear().await?;
    screen.handle_announcement_event(AnnouncementEvent::Continue);

    screen.handle_year_in_review_action(YearInReviewAction::Donate {
        source_rect: Rect::default(),
        slide_logging_id: logging_ids::EDIT_RATE_BASE.into(),
    });

    assert_eq!(h.donation.started().len(), 1);
    assert!(h.events().contains(&AnalyticsEvent::YearInReviewDidTapDonate {
        slide_logging_id: logging_ids::EDIT_RATE_BASE.into(),
        metrics_id: "en_yir_iOS".into(),
    }));
    Ok(())
}

#[tokio::test]
async fn close_logs_and_starts_nothing() -> anyhow::Result<()> {
    let h = Harness::new().with_announcement();
    let screen = h.screen(phone());
    screen.on_appear().await?;

    screen.handle_announcement_event(AnnouncementEvent::Close);

    assert!(screen.year_in_review().is_none());
    assert!(h
        .events()
        .ends_with(&[AnalyticsEvent::FeatureAnnouncementDidTapClose]));
    Ok(())
}
