//! # configs
//!
//! Runtime settings, layered as: built-in defaults, then an optional
//! `recap.toml` in the working directory, then `RECAP__*` environment
//! variables (a `.env` file is read first if present).
//!
//! `RECAP__CAMPAIGN__MAYBE_LATER_COOLDOWN_HOURS=48` overrides
//! `campaign.maybe_later_cooldown_hours`.

use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

/// Upper bound for `campaign.maybe_later_cooldown_hours` (ten years).
pub const MAX_COOLDOWN_HOURS: i64 = 24 * 365 * 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Reporting year the deck is built for
    pub report_year: i32,
    /// Primary app language, used for Year-in-Review donate metrics
    pub app_language: Option<String>,
    /// Region of the device, used to look up campaign assets
    pub country_code: String,
    pub username: Option<String>,
    pub share_link: String,
    pub hashtag: String,
    pub collective: CollectiveSettings,
    pub campaign: CampaignSettings,
    pub log: LogSettings,
    /// JSON fixture seeding the in-memory stores of the demo binary
    pub fixture_path: Option<String>,
}

/// Collective (non-personalized) numbers shown on the base slides.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectiveSettings {
    pub num_articles: String,
    pub num_languages: String,
    pub num_views: String,
    pub num_edits: String,
    pub num_edits_per_minute: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignSettings {
    /// How long a "maybe later" tap suppresses an asset
    pub maybe_later_cooldown_hours: i64,
    /// Delay before confirmation toasts appear
    pub toast_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `info,services=debug`
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Loads settings from defaults, `recap.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        let builder = Self::defaults()?
            .add_source(File::with_name("recap").required(false))
            .add_source(Environment::with_prefix("RECAP").separator("__"));

        Self::finish(builder)
    }

    /// Loads settings from defaults overlaid with an inline TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("report_year", 2024)?
            .set_default("country_code", "US")?
            .set_default(
                "share_link",
                "https://apps.apple.com/app/apple-store/id324715238?pt=208305&ct=yir_2024_share&mt=8",
            )?
            .set_default("hashtag", "#WikipediaYearInReview")?
            .set_default("collective.num_articles", "63.69 million articles")?
            .set_default("collective.num_languages", "332 active languages")?
            .set_default("collective.num_views", "1.4 billion times")?
            .set_default("collective.num_edits", "460,300 edits")?
            .set_default("collective.num_edits_per_minute", "342 edits per minute")?
            .set_default("campaign.maybe_later_cooldown_hours", 24)?
            .set_default("campaign.toast_delay_ms", 500)?
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?)
    }

    fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_COOLDOWN_HOURS).contains(&self.campaign.maybe_later_cooldown_hours) {
            return Err(ConfigError::Invalid(format!(
                "campaign.maybe_later_cooldown_hours must be between 0 and {MAX_COOLDOWN_HOURS}"
            )));
        }
        if self.share_link.trim().is_empty() {
            return Err(ConfigError::Invalid("share_link must not be empty".into()));
        }
        if self.country_code.trim().is_empty() {
            return Err(ConfigError::Invalid("country_code must not be empty".into()));
        }
        Ok(())
    }
}
