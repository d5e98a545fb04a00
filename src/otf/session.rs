//! Collaborator seams: a connector that logs in, and the per-request session it yields.

use async_trait::async_trait;

use crate::core::config::Credentials;
use crate::core::models::{ChallengeCategory, EquipmentType, GeoPoint, StatsWindow};
use crate::core::record::Record;
use crate::errors::OtfError;

/// Opens authenticated sessions against the account-data service.
#[async_trait]
pub trait OtfConnector: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if authentication or session bootstrap fails.
    async fn connect(&self, credentials: &Credentials) -> Result<Box<dyn OtfSession>, OtfError>;
}

/// Read-only operations available on an authenticated account.
///
/// A session belongs to exactly one request and is dropped when it finishes.
#[async_trait]
pub trait OtfSession: Send + Sync {
    async fn get_workouts(&self) -> Result<Vec<Record>, OtfError>;

    async fn get_classes(&self) -> Result<Vec<Record>, OtfError>;

    async fn get_bookings(&self) -> Result<Vec<Record>, OtfError>;

    async fn get_lifetime_stats(&self, window: StatsWindow) -> Result<Record, OtfError>;

    async fn get_performance_summaries(&self) -> Result<Vec<Record>, OtfError>;

    async fn get_benchmarks_by_equipment(
        &self,
        equipment: EquipmentType,
    ) -> Result<Vec<Record>, OtfError>;

    async fn get_benchmarks_by_challenge_category(
        &self,
        category: ChallengeCategory,
    ) -> Result<Vec<Record>, OtfError>;

    /// Studios near `near`, or near the home studio when `None`.
    async fn search_studios_by_geo(&self, near: Option<GeoPoint>)
    -> Result<Vec<Record>, OtfError>;

    /// Detail record for the member's home studio.
    async fn get_studio_detail(&self) -> Result<Record, OtfError>;

    async fn get_studio_services(&self, studio_id: &str) -> Result<Vec<Record>, OtfError>;

    async fn get_favorite_studios(&self) -> Result<Vec<Record>, OtfError>;
}
