//! In-memory `AnnouncementFlagStore`.

use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashSet;
use domains::{AnnouncementFlagStore, Result, WmfProject};

/// The announcement is enabled per primary-language project and shown at
/// most once per install.
#[derive(Default)]
pub struct InMemoryAnnouncementFlags {
    presented: AtomicBool,
    enabled_projects: DashSet<WmfProject>,
}

impl InMemoryAnnouncementFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_for(&self, project: WmfProject) {
        self.enabled_projects.insert(project);
    }
}

impl AnnouncementFlagStore for InMemoryAnnouncementFlags {
    fn should_show_feature_announcement(&self, primary_project: &WmfProject) -> Result<bool> {
        Ok(!self.has_presented_feature_announcement()
            && self.enabled_projects.contains(primary_project))
    }

    fn has_presented_feature_announcement(&self) -> bool {
        self.presented.load(Ordering::SeqCst)
    }

    fn set_has_presented_feature_announcement(&self, presented: bool) {
        self.presented.store(presented, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shown_once_until_reset() {
        let flags = InMemoryAnnouncementFlags::new();
        let en = WmfProject::wikipedia("en");
        flags.enable_for(en.clone());

        assert_eq!(flags.should_show_feature_announcement(&en), Ok(true));
        assert_eq!(flags.should_show_feature_announcement(&WmfProject::Wikidata), Ok(false));

        flags.set_has_presented_feature_announcement(true);
        assert_eq!(flags.should_show_feature_announcement(&en), Ok(false));

        flags.set_has_presented_feature_announcement(false);
        assert_eq!(flags.should_show_feature_announcement(&en), Ok(true));
    }
}
