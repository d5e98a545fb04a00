//! Sequential dataset collection for one request.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use super::flatten::{FlattenedRecord, flatten_records};
use super::profile::{DatasetKind, DatasetSpec, HandlerProfile};
use crate::core::models::{ChallengeCategory, EquipmentType};
use crate::core::record::{FieldValue, Record};
use crate::errors::OtfError;
use crate::otf::client::studio_location;
use crate::otf::session::OtfSession;

/// Benchmark lookups only query this many leading categories of each enumeration.
pub const BENCHMARK_CATEGORY_LIMIT: usize = 2;

/// Fields that identify a studio on a studio-detail record.
pub const STUDIO_ID_KEYS: &[&str] = &["studio_uuid", "studioUUId", "studio_id", "studioId"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dataset {
    Records(Vec<Record>),
    Single(Record),
    Flattened(Vec<FlattenedRecord>),
    Grouped(BTreeMap<String, Vec<Record>>),
}

/// Response body: dataset key to dataset.
pub type ResponsePayload = BTreeMap<String, Dataset>;

/// Runs every dataset of `profile` against `session`, in order.
///
/// The first failure aborts the gather; nothing collected so far is returned.
///
/// # Errors
///
/// Returns the first error any collaborator call produces.
pub async fn gather(
    session: &dyn OtfSession,
    profile: &HandlerProfile,
) -> Result<ResponsePayload, OtfError> {
    let mut payload = ResponsePayload::new();
    let mut home_studio: Option<Record> = None;

    for spec in &profile.datasets {
        debug!(dataset = spec.key, "Fetching dataset");
        let dataset = fetch(session, spec, &mut home_studio).await?;
        payload.insert(spec.key.to_string(), dataset);
    }

    info!(
        profile = profile.name,
        datasets = payload.len(),
        "Gathered all datasets"
    );
    Ok(payload)
}

async fn fetch(
    session: &dyn OtfSession,
    spec: &DatasetSpec,
    home_studio: &mut Option<Record>,
) -> Result<Dataset, OtfError> {
    let dataset = match spec.kind {
        DatasetKind::Workouts => Dataset::Records(session.get_workouts().await?),
        DatasetKind::Classes => records_or_flattened(session.get_classes().await?, spec),
        DatasetKind::Bookings => records_or_flattened(session.get_bookings().await?, spec),
        DatasetKind::PerformanceSummaries => {
            records_or_flattened(session.get_performance_summaries().await?, spec)
        }
        DatasetKind::LifetimeStats(window) => {
            Dataset::Single(session.get_lifetime_stats(window).await?)
        }
        DatasetKind::EquipmentBenchmarks => {
            let mut grouped = BTreeMap::new();
            for equipment in EquipmentType::ALL.iter().take(BENCHMARK_CATEGORY_LIMIT) {
                let records = session.get_benchmarks_by_equipment(*equipment).await?;
                grouped.insert(equipment.name().to_string(), records);
            }
            Dataset::Grouped(grouped)
        }
        DatasetKind::ChallengeBenchmarks => {
            let mut grouped = BTreeMap::new();
            for category in ChallengeCategory::ALL.iter().take(BENCHMARK_CATEGORY_LIMIT) {
                let records = session
                    .get_benchmarks_by_challenge_category(*category)
                    .await?;
                grouped.insert(category.name().to_string(), records);
            }
            Dataset::Grouped(grouped)
        }
        DatasetKind::NearbyStudios => {
            let detail = home_studio_detail(session, home_studio).await?;
            match studio_location(detail) {
                Some(point) => Dataset::Records(session.search_studios_by_geo(Some(point)).await?),
                None => {
                    debug!("Studio detail has no coordinates; skipping nearby search");
                    Dataset::Records(Vec::new())
                }
            }
        }
        DatasetKind::HomeStudio => {
            Dataset::Single(home_studio_detail(session, home_studio).await?.clone())
        }
        DatasetKind::StudioServices => {
            let detail = home_studio_detail(session, home_studio).await?;
            match studio_identifier(detail) {
                Some(studio_id) => {
                    Dataset::Records(session.get_studio_services(&studio_id).await?)
                }
                None => {
                    debug!("Studio detail has no identifier; skipping services");
                    Dataset::Records(Vec::new())
                }
            }
        }
        DatasetKind::FavoriteStudios => Dataset::Records(session.get_favorite_studios().await?),
    };

    Ok(dataset)
}

fn records_or_flattened(records: Vec<Record>, spec: &DatasetSpec) -> Dataset {
    if spec.flatten && spec.kind.supports_flatten() {
        Dataset::Flattened(flatten_records(&records))
    } else {
        Dataset::Records(records)
    }
}

/// Fetches the studio detail at most once per request.
async fn home_studio_detail<'a>(
    session: &dyn OtfSession,
    cache: &'a mut Option<Record>,
) -> Result<&'a Record, OtfError> {
    if cache.is_none() {
        *cache = Some(session.get_studio_detail().await?);
    }
    cache
        .as_ref()
        .ok_or_else(|| OtfError::UnexpectedResponse("studio detail unavailable".to_string()))
}

/// Studio identifier from a studio-detail record, if one is recognizable.
#[must_use]
pub fn studio_identifier(detail: &Record) -> Option<String> {
    STUDIO_ID_KEYS
        .iter()
        .filter_map(|key| detail.get(*key))
        .find_map(|value| match value {
            FieldValue::String(s) if !s.trim().is_empty() => Some(s.clone()),
            FieldValue::Int(id) => Some(id.to_string()),
            FieldValue::UInt(id) => Some(id.to_string()),
            _ => None,
        })
}
