use crate::entitys::program_entity::{MeetingInfo, ProgramType};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use common::config::MeetingConfig;
use common::errors::AppError;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Creates the online meeting room of a program.
#[async_trait]
pub trait MeetingClient: Send + Sync {
    async fn create_meeting(&self, program_type: ProgramType, title: &str, th: i32, start_date: i64) -> Result<MeetingInfo, AppError>;
}

/// Used when no meeting credentials are configured.
pub struct DisabledMeetingClient;

#[async_trait]
impl MeetingClient for DisabledMeetingClient {
    async fn create_meeting(&self, program_type: ProgramType, title: &str, _th: i32, _start_date: i64) -> Result<MeetingInfo, AppError> {
        warn!("meeting requested for {} program '{}' but the meeting client is disabled", program_type, title);
        Err(AppError::ExternalApi("meeting client is not configured".to_string()))
    }
}

pub fn meeting_client_from_config(config: &MeetingConfig) -> Arc<dyn MeetingClient> {
    if config.enabled {
        Arc::new(ZoomMeetingClient::new(config.clone()))
    } else {
        Arc::new(DisabledMeetingClient)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ZoomMeetingResponse {
    id: serde_json::Value,
    join_url: String,
    #[serde(default)]
    password: String,
}

/// Zoom client using server-to-server OAuth (`account_credentials` grant).
pub struct ZoomMeetingClient {
    http: reqwest::Client,
    config: MeetingConfig,
}

impl ZoomMeetingClient {
    pub fn new(config: MeetingConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    async fn access_token(&self) -> Result<String, AppError> {
        let response = self
            .http
            .post(&self.config.oauth_url)
            .query(&[("grant_type", "account_credentials"), ("account_id", self.config.account_id.as_str())])
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .send()
            .await
            .map_err(external)?
            .error_for_status()
            .map_err(external)?;
        Ok(response.json::<TokenResponse>().await.map_err(external)?.access_token)
    }

    fn topic(program_type: ProgramType, title: &str, th: i32) -> String {
        let label = match program_type {
            ProgramType::LetsChat => "LET'S CHAT",
            ProgramType::ChallengeHalf | ProgramType::ChallengeFull => "CHALLENGE",
            ProgramType::Bootcamp => "BOOTCAMP",
        };
        format!("[{}] {} #{}", label, title, th)
    }
}

fn external(e: reqwest::Error) -> AppError {
    AppError::ExternalApi(e.to_string())
}

#[async_trait]
impl MeetingClient for ZoomMeetingClient {
    async fn create_meeting(&self, program_type: ProgramType, title: &str, th: i32, start_date: i64) -> Result<MeetingInfo, AppError> {
        let token = self.access_token().await?;
        let start_time = DateTime::from_timestamp(start_date, 0)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%dT%H:%M:%S").to_string())
            .ok_or_else(|| AppError::Validation(format!("invalid start date {}", start_date)))?;
        let body = json!({
            "topic": Self::topic(program_type, title, th),
            "type": 2,
            "start_time": start_time,
            "duration": self.config.duration_minutes,
            "timezone": self.config.timezone,
            "settings": { "join_before_host": true, "waiting_room": false },
        });
        let url = format!("{}/users/{}/meetings", self.config.api_base, self.config.host_user);
        let created: ZoomMeetingResponse = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(external)?
            .error_for_status()
            .map_err(external)?
            .json()
            .await
            .map_err(external)?;

        let meeting_id = match created.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        info!("meeting {} created for '{}'", meeting_id, title);
        Ok(MeetingInfo { join_url: created.join_url, meeting_id, password: created.password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_client_fails_as_external_error() {
        let client = meeting_client_from_config(&MeetingConfig::default());
        let err = client.create_meeting(ProgramType::LetsChat, "intro", 1, 0).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[test]
    fn topic_names_program_and_cohort() {
        assert_eq!(ZoomMeetingClient::topic(ProgramType::ChallengeFull, "Portfolio", 3), "[CHALLENGE] Portfolio #3");
    }
}
