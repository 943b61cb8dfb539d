//! # storage-adapters
//!
//! In-memory implementations of the `domains` ports, plus the fixture
//! loader that seeds them. Suitable for the demo binary and tests; a device
//! build would swap these for its own persistence.

pub mod analytics;
pub mod fixture;
pub mod memory_announcements;
pub mod memory_campaigns;
pub mod memory_reports;
pub mod surface;

pub use analytics::{MemoryAnalyticsSink, TracingAnalyticsSink};
pub use fixture::{Fixture, FixtureError};
pub use memory_announcements::InMemoryAnnouncementFlags;
pub use memory_campaigns::{AssetVisibility, InMemoryCampaignStore};
pub use memory_reports::InMemoryReportStore;
pub use surface::{Presented, RecordingDonationFlow, RecordingSurface};
