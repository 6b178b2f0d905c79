use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use shiftboard_core::config::ClientConfig;
use shiftboard_core::types::{ClaimKey, TimeslotRecord, Volunteer};
use shiftboard_protocol::{DeleteResponse, ErrorBody, NewVolunteer, TimeslotBody, VolunteerQuery};
use tracing::{debug, warn};

use crate::api::ScheduleApi;
use crate::error::{ApiError, Result};

/// reqwest-backed [`ScheduleApi`] talking to a shiftboard gateway.
pub struct HttpScheduleApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScheduleApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScheduleApi for HttpScheduleApi {
    async fn find_volunteers(&self, first: &str, last: &str) -> Result<Vec<Volunteer>> {
        let req = self
            .client
            .get(self.url("/volunteers"))
            .query(&VolunteerQuery::by_name(first, last));
        match fetch_json(req).await {
            Err(ApiError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn list_volunteers(&self) -> Result<Vec<Volunteer>> {
        fetch_json(self.client.get(self.url("/volunteers"))).await
    }

    async fn register_volunteer(&self, req: &NewVolunteer) -> Result<Volunteer> {
        fetch_json(self.client.post(self.url("/volunteers")).json(req)).await
    }

    async fn list_timeslots(&self) -> Result<Vec<TimeslotRecord>> {
        fetch_json(self.client.get(self.url("/timeslots"))).await
    }

    async fn create_timeslot(&self, key: &ClaimKey) -> Result<TimeslotRecord> {
        let body = TimeslotBody::from(key);
        fetch_json(self.client.post(self.url("/timeslots")).json(&body)).await
    }

    async fn delete_timeslot(&self, key: &ClaimKey) -> Result<u64> {
        let body = TimeslotBody::from(key);
        let resp: DeleteResponse =
            fetch_json(self.client.post(self.url("/timeslots/delete")).json(&body)).await?;
        Ok(resp.deleted)
    }
}

/// Send, classify the status, and decode a JSON body.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let resp = req.send().await.map_err(|e| {
        if e.is_connect() || e.is_timeout() {
            ApiError::Unavailable(e.to_string())
        } else {
            ApiError::Http(e)
        }
    })?;
    let resp = check_status(resp).await?;
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        debug!(status = status.as_u16(), url = %resp.url(), "request ok");
        return Ok(resp);
    }

    let url = resp.url().to_string();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    warn!(status = status.as_u16(), %url, %message, "request failed");

    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Server {
            status: status.as_u16(),
            message,
        },
    })
}
