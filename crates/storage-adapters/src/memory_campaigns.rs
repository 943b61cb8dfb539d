//! # InMemoryCampaignStore
//!
//! `CampaignConfigStore` over a fixed set of assets. Per-asset visibility
//! (permanently hidden / maybe later) is tracked by asset id.
//!
//! Maybe-later policy: a snoozed asset is withheld for `maybe_later_cooldown`
//! after the tap, and "maybe later" is only offered when that cooldown would
//! end before the campaign does.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::{DashMap, DashSet};
use domains::{CampaignAsset, CampaignConfigStore, Result, WmfProject};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetVisibility {
    PermanentlyHidden,
    MaybeLater { at: DateTime<Utc> },
}

pub struct InMemoryCampaignStore {
    assets: DashMap<String, CampaignAsset>,
    opted_in: DashSet<WmfProject>,
    visibility: DashMap<String, AssetVisibility>,
    maybe_later_cooldown: Duration,
}

impl InMemoryCampaignStore {
    pub fn new(maybe_later_cooldown: Duration) -> Self {
        Self {
            assets: DashMap::new(),
            opted_in: DashSet::new(),
            visibility: DashMap::new(),
            maybe_later_cooldown,
        }
    }

    pub fn insert_asset(&self, asset: CampaignAsset) {
        self.assets.insert(asset.id.clone(), asset);
    }

    pub fn set_opted_in(&self, project: WmfProject, opted_in: bool) {
        if opted_in {
            self.opted_in.insert(project);
        } else {
            self.opted_in.remove(&project);
        }
    }

    pub fn visibility(&self, asset_id: &str) -> Option<AssetVisibility> {
        self.visibility.get(asset_id).map(|entry| *entry.value())
    }

    fn is_offerable(&self, asset: &CampaignAsset, now: DateTime<Utc>) -> bool {
        match self.visibility(&asset.id) {
            None => true,
            Some(AssetVisibility::PermanentlyHidden) => false,
            Some(AssetVisibility::MaybeLater { at }) => {
                self.cooldown_end(at).is_some_and(|end| now >= end)
            }
        }
    }

    /// `None` when the cooldown runs past the representable date range.
    fn cooldown_end(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        from.checked_add_signed(self.maybe_later_cooldown)
    }
}

#[async_trait]
impl CampaignConfigStore for InMemoryCampaignStore {
    fn load_active_campaign_asset(
        &self,
        country_code: &str,
        project: &WmfProject,
        now: DateTime<Utc>,
    ) -> Result<Option<CampaignAsset>> {
        let mut candidates: Vec<CampaignAsset> = self
            .assets
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|asset| {
                asset.country_code.eq_ignore_ascii_case(country_code)
                    && &asset.project == project
                    && asset.is_running_at(now)
                    && self.is_offerable(asset, now)
            })
            .collect();

        // DashMap iteration order is unspecified.
        candidates.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        let asset = candidates.into_iter().next();
        debug!(
            country_code,
            project = %project.id(),
            found = asset.as_ref().map(|a| a.id.as_str()),
            "loaded active campaign asset"
        );
        Ok(asset)
    }

    async fn is_opted_in(&self, project: &WmfProject) -> Result<bool> {
        Ok(self.opted_in.contains(project))
    }

    fn mark_asset_as_permanently_hidden(&self, asset: &CampaignAsset) {
        info!(metrics_id = %asset.metrics_id(), "campaign asset permanently hidden");
        self.visibility
            .insert(asset.id.clone(), AssetVisibility::PermanentlyHidden);
    }

    fn mark_asset_as_maybe_later(&self, asset: &CampaignAsset, now: DateTime<Utc>) {
        // Hidden is terminal.
        if self.visibility(&asset.id) == Some(AssetVisibility::PermanentlyHidden) {
            return;
        }
        info!(metrics_id = %asset.metrics_id(), %now, "campaign asset snoozed");
        self.visibility
            .insert(asset.id.clone(), AssetVisibility::MaybeLater { at: now });
    }

    fn should_show_maybe_later_option(&self, asset: &CampaignAsset, now: DateTime<Utc>) -> bool {
        self.cooldown_end(now).is_some_and(|end| end < asset.end)
    }
}
