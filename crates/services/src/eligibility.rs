//! # CampaignEligibilityGate
//!
//! Decides whether the fundraising modal or the Year-in-Review feature
//! announcement may be shown for one screen appearance. Every failure,
//! including store errors, counts as "not eligible".

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domains::{
    AnalyticsEvent, AnalyticsSink, AnnouncementFlagStore, CampaignAsset, CampaignConfigStore,
    DomainError, LayoutContext, Result, WmfProject,
};
use tracing::{debug, info_span, Instrument};

/// One eligibility question, asked once per screen appearance.
#[derive(Debug, Clone, Copy)]
pub enum SurfaceRequest<'a> {
    FundraisingBanner {
        country_code: &'a str,
        project: Option<&'a WmfProject>,
        now: DateTime<Utc>,
    },
    FeatureAnnouncement {
        project: Option<&'a WmfProject>,
        layout: &'a LayoutContext,
        /// Raised when a fundraising modal is going to be shown in this
        /// same appearance.
        fundraising_banner_pending: bool,
    },
}

pub struct CampaignEligibilityGate {
    campaigns: Arc<dyn CampaignConfigStore>,
    announcements: Arc<dyn AnnouncementFlagStore>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl CampaignEligibilityGate {
    pub fn new(
        campaigns: Arc<dyn CampaignConfigStore>,
        announcements: Arc<dyn AnnouncementFlagStore>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            campaigns,
            announcements,
            analytics,
        }
    }

    pub async fn can_show(&self, request: &SurfaceRequest<'_>) -> bool {
        let outcome = match *request {
            SurfaceRequest::FundraisingBanner {
                country_code,
                project,
                now,
            } => self
                .evaluate_fundraising(country_code, project, now)
                .await
                .map(|_| ()),
            SurfaceRequest::FeatureAnnouncement {
                project,
                layout,
                fundraising_banner_pending,
            } => self.evaluate_announcement(project, layout, fundraising_banner_pending),
        };

        match outcome {
            Ok(()) => true,
            Err(reason) => {
                debug!(%reason, "surface suppressed");
                false
            }
        }
    }

    /// Returns the asset to show. When an asset exists but the viewer has
    /// not opted in, a `HiddenBanner` event is logged before refusing.
    pub async fn evaluate_fundraising(
        &self,
        country_code: &str,
        project: Option<&WmfProject>,
        now: DateTime<Utc>,
    ) -> Result<CampaignAsset> {
        let project = project
            .ok_or_else(|| DomainError::NotEligible("screen has no campaign project".into()))?;
        let span = info_span!("gate.fundraising", project = %project.id(), country_code);

        async {
            let opted_in = self.campaigns.is_opted_in(project).await?;

            let asset = self
                .campaigns
                .load_active_campaign_asset(country_code, project, now)?
                .ok_or_else(|| DomainError::NotEligible("no active campaign asset".into()))?;

            if !opted_in {
                self.analytics.log(AnalyticsEvent::HiddenBanner {
                    project: project.clone(),
                    metrics_id: asset.metrics_id(),
                });
                return Err(DomainError::NotEligible(format!(
                    "viewer not opted in for {}",
                    asset.metrics_id()
                )));
            }

            debug!(metrics_id = %asset.metrics_id(), "fundraising banner eligible");
            Ok(asset)
        }
        .instrument(span)
        .await
    }

    pub fn evaluate_announcement(
        &self,
        project: Option<&WmfProject>,
        layout: &LayoutContext,
        fundraising_banner_pending: bool,
    ) -> Result<()> {
        if self.announcements.has_presented_feature_announcement() {
            return Err(DomainError::NotEligible("announcement already presented".into()));
        }
        if layout.is_collapsed_tablet_bar() {
            return Err(DomainError::PreconditionNotMet(
                "navigation bar collapsed on tablet".into(),
            ));
        }
        if fundraising_banner_pending {
            return Err(DomainError::NotEligible(
                "fundraising banner shown in this appearance".into(),
            ));
        }
        let project = project
            .ok_or_else(|| DomainError::NotEligible("screen has no primary project".into()))?;
        if !self.announcements.should_show_feature_announcement(project)? {
            return Err(DomainError::NotEligible(format!(
                "announcement not enabled for {}",
                project.id()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use domains::{
        CampaignAction, DeviceIdiom, MockAnalyticsSink, MockAnnouncementFlagStore,
        MockCampaignConfigStore,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 20, 12, 0, 0).unwrap()
    }

    fn asset() -> CampaignAsset {
        CampaignAsset {
            id: "C24_enUS_m_01".into(),
            language_code: "en".into(),
            country_code: "US".into(),
            project: WmfProject::wikipedia("en"),
            start: Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap(),
            text_html: "Please donate".into(),
            footer_html: "Donor policy".into(),
            actions: vec![CampaignAction {
                title: "Donate".into(),
                url: Some("https://donate.example.org".into()),
            }],
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

    fn gate(
        campaigns: MockCampaignConfigStore,
        announcements: MockAnnouncementFlagStore,
        analytics: MockAnalyticsSink,
    ) -> CampaignEligibilityGate {
        CampaignEligibilityGate::new(Arc::new(campaigns), Arc::new(announcements), Arc::new(analytics))
    }

    #[tokio::test]
    async fn opted_in_viewer_with_active_asset_is_eligible() {
        let mut campaigns = MockCampaignConfigStore::new();
        campaigns.expect_is_opted_in().returning(|_| Ok(true));
        campaigns
            .expect_load_active_campaign_asset()
            .withf(|country, _, _| country == "US")
            .returning(|_, _, _| Ok(Some(asset())));
        let mut analytics = MockAnalyticsSink::new();
        analytics.expect_log().never();

        let gate = gate(campaigns, MockAnnouncementFlagStore::new(), analytics);
        let project = WmfProject::wikipedia("en");
        let found = gate.evaluate_fundraising("US", Some(&project), now()).await.unwrap();
        assert_eq!(found.id, "C24_enUS_m_01");
    }

    #[tokio::test]
    async fn not_opted_in_logs_hidden_banner_and_refuses() {
        let mut campaigns = MockCampaignConfigStore::new();
        campaigns.expect_is_opted_in().returning(|_| Ok(false));
        campaigns
            .expect_load_active_campaign_asset()
            .returning(|_, _, _| Ok(Some(asset())));
        let mut analytics = MockAnalyticsSink::new();
        analytics
            .expect_log()
            .withf(|event| {
                matches!(event, AnalyticsEvent::HiddenBanner { metrics_id, .. } if metrics_id == "enUS_C24_enUS_m_01_iOS")
            })
            .times(1)
            .return_const(());

        let gate = gate(campaigns, MockAnnouncementFlagStore::new(), analytics);
        let project = WmfProject::wikipedia("en");
        let request = SurfaceRequest::FundraisingBanner {
            country_code: "US",
            project: Some(&project),
            now: now(),
        };
        assert!(!gate.can_show(&request).await);
    }

    #[tokio::test]
    async fn store_errors_and_missing_project_fail_closed() {
        let mut campaigns = MockCampaignConfigStore::new();
        campaigns
            .expect_is_opted_in()
            .returning(|_| Err(DomainError::DataUnavailable("offline".into())));
        campaigns.expect_load_active_campaign_asset().never();

        let gate = gate(campaigns, MockAnnouncementFlagStore::new(), MockAnalyticsSink::new());
        let project = WmfProject::wikipedia("en");
        let err = gate.evaluate_fundraising("US", Some(&project), now()).await.unwrap_err();
        assert!(matches!(err, DomainError::DataUnavailable(_)));

        let missing = SurfaceRequest::FundraisingBanner {
            country_code: "US",
            project: None,
            now: now(),
        };
        assert!(!gate.can_show(&missing).await);
    }

    #[test]
    fn announcement_requires_unpresented_enabled_flag() {
        let mut flags = MockAnnouncementFlagStore::new();
        flags.expect_has_presented_feature_announcement().return_const(false);
        flags
            .expect_should_show_feature_announcement()
            .returning(|_| Ok(true));

        let gate = gate(MockCampaignConfigStore::new(), flags, MockAnalyticsSink::new());
        let project = WmfProject::wikipedia("en");
        let layout = phone_layout();
        let request = SurfaceRequest::FeatureAnnouncement {
            project: Some(&project),
            layout: &layout,
            fundraising_banner_pending: false,
        };
        assert!(tokio_test::block_on(gate.can_show(&request)));
    }

    #[test]
    fn pending_fundraising_banner_suppresses_announcement() {
        let mut flags = MockAnnouncementFlagStore::new();
        flags.expect_has_presented_feature_announcement().return_const(false);
        flags.expect_should_show_feature_announcement().never();

        let gate = gate(MockCampaignConfigStore::new(), flags, MockAnalyticsSink::new());
        let project = WmfProject::wikipedia("en");
        let err = gate
            .evaluate_announcement(Some(&project), &phone_layout(), true)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotEligible(_)));
    }

    #[test]
    fn collapsed_tablet_bar_is_a_precondition_failure() {
        let mut flags = MockAnnouncementFlagStore::new();
        flags.expect_has_presented_feature_announcement().return_const(false);

        let gate = gate(MockCampaignConfigStore::new(), flags, MockAnalyticsSink::new());
        let project = WmfProject::wikipedia("en");
        let layout = LayoutContext {
            idiom: DeviceIdiom::Pad,
            navigation_bar_hidden_height: 20.0,
            ..phone_layout()
        };
        let err = gate.evaluate_announcement(Some(&project), &layout, false).unwrap_err();
        assert!(matches!(err, DomainError::PreconditionNotMet(_)));
    }

    #[test]
    fn already_presented_announcement_is_not_repeated() {
        let mut flags = MockAnnouncementFlagStore::new();
        flags.expect_has_presented_feature_announcement().return_const(true);
        flags.expect_should_show_feature_announcement().never();

        let gate = gate(MockCampaignConfigStore::new(), flags, MockAnalyticsSink::new());
        let project = WmfProject::wikipedia("en");
        assert!(gate.evaluate_announcement(Some(&project), &phone_layout(), false).is_err());
    }
}
