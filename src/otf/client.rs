//! HTTP implementation of the account-data collaborator.
//!
//! Plain `reqwest` calls against the OTF member APIs. No retries and no caching:
//! a failed call fails the request.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use super::auth::{self, AuthTokens};
use super::session::{OtfConnector, OtfSession};
use crate::core::config::{AppConfig, Credentials};
use crate::core::models::{ChallengeCategory, EquipmentType, GeoPoint, StatsWindow};
use crate::core::record::{FieldValue, Record, record_from_json, records_from_json};
use crate::errors::OtfError;

const BOOKINGS_LOOKAHEAD_DAYS: i64 = 30;
const STUDIO_SEARCH_PAGE_SIZE: u32 = 50;
const PERFORMANCE_SUMMARY_LIMIT: u32 = 30;

/// Builds one [`HttpSession`] per request.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: Client,
    config: AppConfig,
}

impl HttpConnector {
    /// # Errors
    ///
    /// Returns `OtfError::ConfigError` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, OtfError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| OtfError::ConfigError(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl OtfConnector for HttpConnector {
    async fn connect(&self, credentials: &Credentials) -> Result<Box<dyn OtfSession>, OtfError> {
        let tokens = auth::login(&self.http, &self.config, credentials).await?;
        let member_uuid = auth::member_uuid_from_id_token(&tokens.id_token)?;

        let mut session = HttpSession {
            http: self.http.clone(),
            api_base_url: self.config.api_base_url.clone(),
            io_base_url: self.config.io_base_url.clone(),
            search_radius_miles: self.config.studio_search_radius_miles,
            tokens,
            member_uuid,
            home_studio_uuid: None,
        };

        let member = session.get_member_details().await?;
        session.home_studio_uuid = home_studio_uuid(&member);
        info!(
            member_uuid = %session.member_uuid,
            home_studio = ?session.home_studio_uuid,
            "OTF session opened"
        );

        Ok(Box::new(session))
    }
}

pub struct HttpSession {
    http: Client,
    api_base_url: Url,
    io_base_url: Url,
    search_radius_miles: u32,
    tokens: AuthTokens,
    member_uuid: String,
    home_studio_uuid: Option<String>,
}

impl HttpSession {
    async fn get_json(
        &self,
        base: &Url,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, OtfError> {
        let url = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| OtfError::ConfigError(format!("bad endpoint {path}: {e}")))?;

        debug!(url = %url, "OTF API request");

        let response = self
            .http
            .get(url)
            .header("Authorization", &self.tokens.id_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(OtfError::ApiError(format!(
                "GET {path} failed with status {status}: {text}"
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| OtfError::UnexpectedResponse(format!("GET {path}: {e}")))
    }

    async fn get_member_details(&self) -> Result<Record, OtfError> {
        let path = format!("member/members/{}", self.member_uuid);
        let value = self
            .get_json(&self.api_base_url, &path, &[("include", "memberAddresses,memberClassSummary".to_string())])
            .await?;
        record_from_json(value)
    }

    fn require_home_studio(&self) -> Result<&str, OtfError> {
        self.home_studio_uuid
            .as_deref()
            .ok_or_else(|| OtfError::UnexpectedResponse("member has no home studio".to_string()))
    }
}

#[async_trait]
impl OtfSession for HttpSession {
    async fn get_workouts(&self) -> Result<Vec<Record>, OtfError> {
        let path = format!("member/members/{}/workouts", self.member_uuid);
        records_from_json(self.get_json(&self.api_base_url, &path, &[]).await?)
    }

    async fn get_classes(&self) -> Result<Vec<Record>, OtfError> {
        let studio = self.require_home_studio()?;
        let value = self
            .get_json(&self.io_base_url, "v1/classes", &[("studio_ids", studio.to_string())])
            .await?;
        // The classes endpoint nests its list one level deeper.
        let value = match value {
            Value::Object(mut map) if map.contains_key("items") => {
                map.remove("items").unwrap_or(Value::Null)
            }
            other => other,
        };
        records_from_json(value)
    }

    async fn get_bookings(&self) -> Result<Vec<Record>, OtfError> {
        let today = Utc::now().date_naive();
        let until = today + ChronoDuration::days(BOOKINGS_LOOKAHEAD_DAYS);
        let path = format!("member/members/{}/bookings", self.member_uuid);
        let query = [
            ("startDate", today.format("%Y-%m-%d").to_string()),
            ("endDate", until.format("%Y-%m-%d").to_string()),
            ("statuses", "Booked".to_string()),
        ];
        records_from_json(self.get_json(&self.api_base_url, &path, &query).await?)
    }

    async fn get_lifetime_stats(&self, window: StatsWindow) -> Result<Record, OtfError> {
        let path = format!(
            "performance/v2/{}/over-time/{}",
            self.member_uuid,
            window.as_path()
        );
        record_from_json(self.get_json(&self.api_base_url, &path, &[]).await?)
    }

    async fn get_performance_summaries(&self) -> Result<Vec<Record>, OtfError> {
        let query = [("limit", PERFORMANCE_SUMMARY_LIMIT.to_string())];
        let value = self
            .get_json(&self.io_base_url, "v1/performance-summaries", &query)
            .await?;
        records_from_json(value)
    }

    async fn get_benchmarks_by_equipment(
        &self,
        equipment: EquipmentType,
    ) -> Result<Vec<Record>, OtfError> {
        let path = format!(
            "member/members/{}/challenge-tracker/equipment",
            self.member_uuid
        );
        let query = [("equipmentId", equipment.id().to_string())];
        records_from_json(self.get_json(&self.api_base_url, &path, &query).await?)
    }

    async fn get_benchmarks_by_challenge_category(
        &self,
        category: ChallengeCategory,
    ) -> Result<Vec<Record>, OtfError> {
        let path = format!(
            "member/members/{}/challenge-tracker/challenge",
            self.member_uuid
        );
        let query = [("challengeCategoryId", category.id().to_string())];
        records_from_json(self.get_json(&self.api_base_url, &path, &query).await?)
    }

    async fn search_studios_by_geo(
        &self,
        near: Option<GeoPoint>,
    ) -> Result<Vec<Record>, OtfError> {
        let point = match near {
            Some(point) => point,
            None => studio_location(&self.get_studio_detail().await?).ok_or_else(|| {
                OtfError::UnexpectedResponse("home studio has no coordinates".to_string())
            })?,
        };

        let query = [
            ("latitude", point.latitude.to_string()),
            ("longitude", point.longitude.to_string()),
            ("distance", self.search_radius_miles.to_string()),
            ("pageIndex", "1".to_string()),
            ("pageSize", STUDIO_SEARCH_PAGE_SIZE.to_string()),
        ];
        let value = self
            .get_json(&self.api_base_url, "mobile/v1/studios", &query)
            .await?;
        let value = match value {
            Value::Object(mut map) if map.contains_key("studios") => {
                map.remove("studios").unwrap_or(Value::Null)
            }
            other => other,
        };
        records_from_json(value)
    }

    async fn get_studio_detail(&self) -> Result<Record, OtfError> {
        let path = format!("mobile/v1/studios/{}", self.require_home_studio()?);
        record_from_json(self.get_json(&self.api_base_url, &path, &[]).await?)
    }

    async fn get_studio_services(&self, studio_id: &str) -> Result<Vec<Record>, OtfError> {
        let path = format!("member/studios/{studio_id}/services");
        records_from_json(self.get_json(&self.api_base_url, &path, &[]).await?)
    }

    async fn get_favorite_studios(&self) -> Result<Vec<Record>, OtfError> {
        let path = format!("member/members/{}/favorite-studios", self.member_uuid);
        records_from_json(self.get_json(&self.api_base_url, &path, &[]).await?)
    }
}

/// Home-studio UUID from a member profile record.
#[must_use]
pub fn home_studio_uuid(member: &Record) -> Option<String> {
    member
        .get("homeStudio")
        .or_else(|| member.get("home_studio"))
        .and_then(FieldValue::as_map)
        .and_then(|studio| {
            ["studioUUId", "studio_uuid", "studioUuid"]
                .iter()
                .find_map(|key| studio.get(*key).and_then(FieldValue::as_str))
        })
        .or_else(|| member.get("homeStudioUUId").and_then(FieldValue::as_str))
        .map(ToString::to_string)
}

/// Coordinates from a studio detail record, either top-level or under `studioLocation`.
#[must_use]
pub fn studio_location(studio: &Record) -> Option<GeoPoint> {
    let read = |record: &Record| -> Option<GeoPoint> {
        Some(GeoPoint {
            latitude: record.get("latitude")?.as_f64()?,
            longitude: record.get("longitude")?.as_f64()?,
        })
    };

    read(studio).or_else(|| {
        studio
            .get("studioLocation")
            .or_else(|| studio.get("studio_location"))
            .and_then(FieldValue::as_map)
            .and_then(read)
    })
}
