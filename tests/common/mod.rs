#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use otf_proxy::core::config::Credentials;
use otf_proxy::core::models::{ChallengeCategory, EquipmentType, GeoPoint, StatsWindow};
use otf_proxy::core::record::{FieldValue, Record, record_from_json, records_from_json};
use otf_proxy::errors::OtfError;
use otf_proxy::otf::{OtfConnector, OtfSession};
use serde_json::{Value, json};

/// Shared call log so tests can inspect what the handler asked for.
pub type CallLog = Arc<Mutex<Vec<String>>>;

#[derive(Clone)]
pub struct Fixtures {
    pub studio_detail: Value,
    /// Operation name that should fail, if any.
    pub fail_on: Option<&'static str>,
    /// Adds a bytes field to every workout, which has no JSON form.
    pub binary_workouts: bool,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            studio_detail: json!({
                "studio_uuid": "studio-1",
                "name": "Downtown",
                "opened_at": "2019-03-01",
                "studioLocation": {"latitude": 40.7, "longitude": -74.0}
            }),
            fail_on: None,
            binary_workouts: false,
        }
    }
}

pub struct StubConnector {
    pub fixtures: Fixtures,
    pub calls: CallLog,
}

impl StubConnector {
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            fixtures,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl OtfConnector for StubConnector {
    async fn connect(&self, _credentials: &Credentials) -> Result<Box<dyn OtfSession>, OtfError> {
        self.calls.lock().unwrap().push("connect".to_string());
        if self.fixtures.fail_on == Some("connect") {
            return Err(OtfError::AuthError("NotAuthorizedException".to_string()));
        }
        Ok(Box::new(StubSession {
            fixtures: self.fixtures.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

pub struct StubSession {
    fixtures: Fixtures,
    calls: CallLog,
}

impl StubSession {
    fn record_call(&self, name: &str) -> Result<(), OtfError> {
        self.calls.lock().unwrap().push(name.to_string());
        if self
            .fixtures
            .fail_on
            .is_some_and(|op| name.starts_with(op))
        {
            return Err(anyhow::anyhow!("upstream exploded during {name}").into());
        }
        Ok(())
    }
}

pub fn class_fixture() -> Value {
    json!([
        {
            "name": "Orange 60",
            "starts_at": "2024-05-01T06:15:00-04:00",
            "coach": {"first_name": "Jane", "last_name": "Doe"},
            "studio": {"name": "Downtown", "studio_uuid": "studio-1"}
        },
        {
            "name": "Strength 50",
            "starts_at": "2024-05-02T07:00:00Z",
            "coach": "Jane Doe"
        },
        {
            "name": "Tread 50",
            "starts_at": "2024-05-03T18:30:00Z"
        }
    ])
}

pub fn booking_fixture() -> Value {
    json!([
        {
            "booking_uuid": "b-1",
            "status": "Booked",
            "otf_class": {
                "name": "Orange 60",
                "starts_at": "2024-05-01T06:15:00-04:00",
                "coach": {"firstName": "Sam", "lastName": "Lee"},
                "studio": {"name": "Uptown"}
            }
        }
    ])
}

#[async_trait]
impl OtfSession for StubSession {
    async fn get_workouts(&self) -> Result<Vec<Record>, OtfError> {
        self.record_call("get_workouts")?;
        let mut workouts = records_from_json(json!([{"class_name": "Orange 60", "calories": 512}]))?;
        if self.fixtures.binary_workouts {
            for workout in &mut workouts {
                workout.insert("heart_rate_blob".to_string(), FieldValue::Binary(vec![1, 2, 3]));
            }
        }
        Ok(workouts)
    }

    async fn get_classes(&self) -> Result<Vec<Record>, OtfError> {
        self.record_call("get_classes")?;
        records_from_json(class_fixture())
    }

    async fn get_bookings(&self) -> Result<Vec<Record>, OtfError> {
        self.record_call("get_bookings")?;
        records_from_json(booking_fixture())
    }

    async fn get_lifetime_stats(&self, window: StatsWindow) -> Result<Record, OtfError> {
        self.record_call(&format!("get_lifetime_stats:{}", window.as_path()))?;
        record_from_json(json!({"window": window.as_path(), "total_classes": 120}))
    }

    async fn get_performance_summaries(&self) -> Result<Vec<Record>, OtfError> {
        self.record_call("get_performance_summaries")?;
        records_from_json(json!([
            {"class": {"name": "Orange 60", "starts_at": "2024-04-20T09:00:00Z", "coach": "Alex"},
             "splat_points": 14}
        ]))
    }

    async fn get_benchmarks_by_equipment(
        &self,
        equipment: EquipmentType,
    ) -> Result<Vec<Record>, OtfError> {
        self.record_call(&format!("get_benchmarks_by_equipment:{}", equipment.name()))?;
        records_from_json(json!([{"equipment_id": equipment.id()}]))
    }

    async fn get_benchmarks_by_challenge_category(
        &self,
        category: ChallengeCategory,
    ) -> Result<Vec<Record>, OtfError> {
        self.record_call(&format!(
            "get_benchmarks_by_challenge_category:{}",
            category.name()
        ))?;
        records_from_json(json!([{"challenge_category_id": category.id()}]))
    }

    async fn search_studios_by_geo(
        &self,
        near: Option<GeoPoint>,
    ) -> Result<Vec<Record>, OtfError> {
        let origin = near.map_or_else(
            || "home".to_string(),
            |p| format!("{},{}", p.latitude, p.longitude),
        );
        self.record_call(&format!("search_studios_by_geo:{origin}"))?;
        records_from_json(json!([{"studio_uuid": "studio-2", "name": "Midtown"}]))
    }

    async fn get_studio_detail(&self) -> Result<Record, OtfError> {
        self.record_call("get_studio_detail")?;
        record_from_json(self.fixtures.studio_detail.clone())
    }

    async fn get_studio_services(&self, studio_id: &str) -> Result<Vec<Record>, OtfError> {
        self.record_call(&format!("get_studio_services:{studio_id}"))?;
        records_from_json(json!([{"name": "Massage chair", "price": "5.00"}]))
    }

    async fn get_favorite_studios(&self) -> Result<Vec<Record>, OtfError> {
        self.record_call("get_favorite_studios")?;
        records_from_json(json!([{"studio_uuid": "studio-1"}]))
    }
}

pub fn credentials() -> Result<Credentials, OtfError> {
    Ok(Credentials {
        email: "member@example.com".to_string(),
        password: "secret".to_string(),
    })
}

/// Decodes the `body` string of a proxy response.
pub fn body_of(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().expect("body string")).expect("JSON body")
}
