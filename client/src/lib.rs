//! HTTP client for the intervals.icu API.
//!
//! One client instance is scoped to one athlete and one API key. Every
//! response is validated against the shared schemas before a caller sees
//! it, and calendar mutations run behind the past-event guard: an event
//! whose start has passed can be read but never changed. The guard for
//! update and delete is a read-then-act protocol against the live store,
//! because the calendar may have been edited out-of-band and only the
//! freshly read start timestamp counts.
//!
//! The client holds no mutable state, so one instance can serve any number
//! of concurrent callers.

use chrono::{Local, NaiveDateTime};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use intervals_core::activity::Activity;
use intervals_core::athlete::AthleteProfile;
use intervals_core::dates;
use intervals_core::error::ClientError;
use intervals_core::event::{CreateEventRequest, Event, UpdateEventRequest};
use intervals_core::wellness::WellnessEntry;
use intervals_core::workout::{CreateWorkoutRequest, Workout};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://intervals.icu/api/v1";

/// intervals.icu basic-auth convention: the username is the literal string
/// "API_KEY", the password is the key itself.
const BASIC_AUTH_USERNAME: &str = "API_KEY";

/// Immutable client configuration. `base_url` is configurable so tests can
/// point a client at a local fixture; everything real uses
/// [`DEFAULT_BASE_URL`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub athlete_id: String,
    pub api_key: String,
    pub base_url: String,
}

/// Acknowledgment for a completed delete. intervals.icu sends no useful
/// body back, so the client synthesizes one.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub success: bool,
    pub id: i64,
}

pub struct IntervalsClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl IntervalsClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Athlete every operation is scoped to.
    pub fn athlete_id(&self) -> &str {
        &self.config.athlete_id
    }

    /// Fetches the configured athlete's profile. Doubles as the cheapest
    /// way to check that the credentials work.
    pub async fn get_athlete_profile(&self) -> Result<AthleteProfile, ClientError> {
        let path = format!("/athlete/{}", self.config.athlete_id);
        self.get_json("get_athlete_profile", &path, &[]).await
    }

    /// Activities whose local start falls in `oldest..=newest`, calendar
    /// dates, inclusive on both ends.
    pub async fn get_activities(
        &self,
        oldest: &str,
        newest: &str,
    ) -> Result<Vec<Activity>, ClientError> {
        let path = format!("/athlete/{}/activities", self.config.athlete_id);
        self.get_json(
            "get_activities",
            &path,
            &[("oldest", oldest), ("newest", newest)],
        )
        .await
    }

    /// Single activity lookup. Not scoped under the athlete path; activity
    /// ids are global.
    pub async fn get_activity(&self, activity_id: &str) -> Result<Activity, ClientError> {
        let path = format!("/activity/{activity_id}");
        self.get_json("get_activity", &path, &[]).await
    }

    /// Wellness entries in `oldest..=newest`. The `.json` suffix picks the
    /// JSON rendering of the wellness list.
    pub async fn get_wellness(
        &self,
        oldest: &str,
        newest: &str,
    ) -> Result<Vec<WellnessEntry>, ClientError> {
        let path = format!("/athlete/{}/wellness.json", self.config.athlete_id);
        self.get_json(
            "get_wellness",
            &path,
            &[("oldest", oldest), ("newest", newest)],
        )
        .await
    }

    /// The athlete's workout library.
    pub async fn get_workouts(&self) -> Result<Vec<Workout>, ClientError> {
        let path = format!("/athlete/{}/workouts", self.config.athlete_id);
        self.get_json("get_workouts", &path, &[]).await
    }

    /// Adds a workout to the library. No temporal restriction here; the
    /// library is not the calendar.
    pub async fn create_workout(
        &self,
        input: &CreateWorkoutRequest,
    ) -> Result<Workout, ClientError> {
        let path = format!("/athlete/{}/workouts", self.config.athlete_id);
        let body = to_body("create_workout", input)?;
        let raw = self
            .send("create_workout", Method::POST, &path, &[], Some(body))
            .await?;
        decode("create_workout", raw)
    }

    /// Calendar events in `oldest..=newest`.
    pub async fn get_events(&self, oldest: &str, newest: &str) -> Result<Vec<Event>, ClientError> {
        let path = format!("/athlete/{}/events", self.config.athlete_id);
        self.get_json("get_events", &path, &[("oldest", oldest), ("newest", newest)])
            .await
    }

    /// Puts a new entry on the calendar. The start must lie in the future;
    /// a past start is rejected before any request goes out. The comparison
    /// against the local clock is strict, no grace window.
    pub async fn create_event(&self, input: &CreateEventRequest) -> Result<Event, ClientError> {
        let start = input.start().map_err(|err| ClientError::Validation {
            operation: "create_event".to_string(),
            detail: err.to_string(),
        })?;
        if start < Local::now().naive_local() {
            warn!(%start, "past-event guard rejected a create");
            return Err(ClientError::PastEvent {
                action: "create",
                start,
            });
        }
        let path = format!("/athlete/{}/events", self.config.athlete_id);
        let body = to_body("create_event", input)?;
        let raw = self
            .send("create_event", Method::POST, &path, &[], Some(body))
            .await?;
        decode("create_event", raw)
    }

    /// Patches a future event. Guard protocol: read the stored event, check
    /// its start against now, only then write. A patch may move an event
    /// further into the future or rename it, but an event that has already
    /// started is locked.
    pub async fn update_event(
        &self,
        id: i64,
        patch: &UpdateEventRequest,
    ) -> Result<Event, ClientError> {
        patch.start().map_err(|err| ClientError::Validation {
            operation: "update_event".to_string(),
            detail: err.to_string(),
        })?;
        let guard_op = format!("fetch_event_for_update-{id}");
        let existing = self.fetch_guarded_event(&guard_op, id).await?;
        require_future_start(&guard_op, "modify", &existing)?;
        let path = format!("/athlete/{}/events/{id}", self.config.athlete_id);
        let body = to_body("update_event", patch)?;
        let raw = self
            .send("update_event", Method::PUT, &path, &[], Some(body))
            .await?;
        decode("update_event", raw)
    }

    /// Removes a future event. Same protocol as update, with a delete as
    /// the write step.
    pub async fn delete_event(&self, id: i64) -> Result<DeleteAck, ClientError> {
        let guard_op = format!("fetch_event_for_delete-{id}");
        let existing = self.fetch_guarded_event(&guard_op, id).await?;
        require_future_start(&guard_op, "delete", &existing)?;
        let path = format!("/athlete/{}/events/{id}", self.config.athlete_id);
        self.send("delete_event", Method::DELETE, &path, &[], None)
            .await?;
        Ok(DeleteAck { success: true, id })
    }

    /// Read step of the guard protocol. The caller supplies an id-tagged
    /// operation label (`fetch_event_for_update-7`) so a failed read names
    /// both the phase and the event it was for; a success with a null body
    /// means the id is unknown.
    async fn fetch_guarded_event(
        &self,
        operation: &str,
        id: i64,
    ) -> Result<Event, ClientError> {
        let path = format!("/athlete/{}/events/{id}", self.config.athlete_id);
        let existing: Option<Event> = self.get_json(operation, &path, &[]).await?;
        existing.ok_or(ClientError::EventNotFound { id })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let raw = self.send(operation, Method::GET, path, query, None).await?;
        decode(operation, raw)
    }

    async fn send(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(operation, %method, path, "calling intervals.icu");
        let mut request = self
            .http
            .request(method, &url)
            .basic_auth(BASIC_AUTH_USERNAME, Some(&self.config.api_key));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|err| ClientError::Api {
            operation: operation.to_string(),
            status: None,
            message: err.to_string(),
        })?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| ClientError::Api {
            operation: operation.to_string(),
            status: Some(status.as_u16()),
            message: err.to_string(),
        })?;
        if !status.is_success() {
            return Err(ClientError::Api {
                operation: operation.to_string(),
                status: Some(status.as_u16()),
                message: remote_error_message(status, &bytes),
            });
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| ClientError::Validation {
            operation: operation.to_string(),
            detail: err.to_string(),
        })
    }
}

/// Second half of the guard: the stored event must not have started yet.
fn require_future_start(
    operation: &str,
    action: &'static str,
    event: &Event,
) -> Result<(), ClientError> {
    let start: NaiveDateTime = dates::parse_fetched_datetime(&event.start_date_local).map_err(
        |err| ClientError::Validation {
            operation: operation.to_string(),
            detail: err.to_string(),
        },
    )?;
    if start < Local::now().naive_local() {
        warn!(%start, action, "past-event guard rejected a calendar mutation");
        return Err(ClientError::PastEvent { action, start });
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(operation: &str, raw: Value) -> Result<T, ClientError> {
    serde_json::from_value(raw).map_err(|err| ClientError::Validation {
        operation: operation.to_string(),
        detail: err.to_string(),
    })
}

fn to_body<T: Serialize>(operation: &str, input: &T) -> Result<Value, ClientError> {
    serde_json::to_value(input).map_err(|err| ClientError::Validation {
        operation: operation.to_string(),
        detail: err.to_string(),
    })
}

/// Prefers the structured `error` field intervals.icu puts in JSON error
/// bodies, falls back to the raw body, then to the status line.
fn remote_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let raw = String::from_utf8_lossy(body);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}
