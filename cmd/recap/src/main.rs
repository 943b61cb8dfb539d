//! # recap
//!
//! Headless walkthrough of one article-screen appearance: the fundraising
//! check, the Year-in-Review announcement and, if it is shown, the deck.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use configs::Settings;
use domains::{AnnouncementEvent, CampaignModalEvent, DeviceIdiom, LayoutContext, SystemClock, WmfProject};
use services::{AppearanceOutcome, ArticleScreen, CollectiveStats, FlowSettings, Services};
use storage_adapters::{
    Fixture, InMemoryAnnouncementFlags, InMemoryCampaignStore, InMemoryReportStore,
    RecordingDonationFlow, RecordingSurface, TracingAnalyticsSink,
};
use tracing_subscriber::EnvFilter;

const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.json");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings);

    // 1. Seed the in-memory stores
    let fixture = match &settings.fixture_path {
        Some(path) => Fixture::load(path).await?,
        None => Fixture::from_json_str(DEMO_FIXTURE)?,
    };
    let reports = Arc::new(InMemoryReportStore::new());
    let cooldown = chrono::Duration::try_hours(settings.campaign.maybe_later_cooldown_hours)
        .context("campaign.maybe_later_cooldown_hours out of range")?;
    let campaigns = Arc::new(InMemoryCampaignStore::new(cooldown));
    let announcements = Arc::new(InMemoryAnnouncementFlags::new());
    fixture.seed(&reports, &campaigns, &announcements)?;

    // 2. Assemble the process-wide services
    let surface = Arc::new(RecordingSurface::new());
    let services = Services {
        reports,
        campaigns,
        announcements,
        analytics: Arc::new(TracingAnalyticsSink),
        surface: surface.clone(),
        donation: Arc::new(RecordingDonationFlow::new()),
        clock: Arc::new(SystemClock),
    };
    let flow_settings = Arc::new(flow_settings(&settings));

    // 3. One appearance of an English Wikipedia article
    let language = settings.app_language.clone().unwrap_or_else(|| "en".to_string());
    let screen = ArticleScreen::new(
        services,
        flow_settings,
        format!("https://{language}.wikipedia.org/wiki/Rust_(programming_language)"),
        Some(WmfProject::wikipedia(language)),
        phone_layout(),
    );

    let outcome = screen.on_appear().await?;
    tracing::info!(?outcome, "appearance finished");

    // 4. Play the user's part
    match outcome {
        AppearanceOutcome::FundraisingModal { .. } => {
            if let Some(toast) = screen.handle_campaign_event(CampaignModalEvent::MaybeLater) {
                toast.await?;
            }
        }
        AppearanceOutcome::FeatureAnnouncement { anchored: true } => {
            screen.handle_announcement_event(AnnouncementEvent::Continue);
            if let Some(deck) = screen.year_in_review().and_then(|c| c.deck()) {
                for (index, slide) in deck.slides.iter().enumerate() {
                    println!("{}/{} [{}] {}", index + 1, deck.slides.len(), slide.logging_id, slide.title);
                }
            }
        }
        AppearanceOutcome::FeatureAnnouncement { anchored: false }
        | AppearanceOutcome::Nothing
        | AppearanceOutcome::ScreenGone => {}
    }

    tracing::info!(presented = surface.presented().len(), "done");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));

    if settings.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn flow_settings(settings: &Settings) -> FlowSettings {
    FlowSettings {
        report_year: settings.report_year,
        app_language: settings.app_language.clone(),
        country_code: settings.country_code.clone(),
        username: settings.username.clone(),
        share_link: settings.share_link.clone(),
        hashtag: settings.hashtag.clone(),
        collective: CollectiveStats {
            num_articles: settings.collective.num_articles.clone(),
            num_languages: settings.collective.num_languages.clone(),
            num_views: settings.collective.num_views.clone(),
            num_edits: settings.collective.num_edits.clone(),
            num_edits_per_minute: settings.collective.num_edits_per_minute.clone(),
        },
        toast_delay: Duration::from_millis(settings.campaign.toast_delay_ms),
    }
}

fn phone_layout() -> LayoutContext {
    LayoutContext {
        idiom: DeviceIdiom::Phone,
        navigation_bar_hidden_height: 0.0,
        navigation_bar_attached: true,
        navigation_bar_width: 390.0,
        safe_area_top: 47.0,
        bar_top_spacing: 0.0,
    }
}
