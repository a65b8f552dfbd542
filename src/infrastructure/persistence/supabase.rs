//! Supabase (PostgREST) persistence adapter

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{
    MeetingStore, SettingsStore, StoreError, SubscriptionStore, TaskStore,
};
use crate::domain::meeting::{
    MeetingId, MeetingRecord, MeetingUpdate, NewMeeting, NewTask, TaskId, TaskUpdate, UploadTask,
};
use crate::domain::settings::UserSettings;
use crate::domain::subscription::SubscriptionSnapshot;

const MEETINGS: &str = "meetings";
const SUBSCRIPTIONS: &str = "user_subscriptions";
const SETTINGS: &str = "user_settings";
const TASKS: &str = "background_tasks";

const SUBSCRIPTION_COLUMNS: &str = "plan_type,minutes_quota,minutes_used_this_month";
const SETTINGS_COLUMNS: &str = "email_method,gmail_connected,smtp_host,smtp_user,signature_text";

#[derive(Debug, Deserialize)]
struct IdRow<T> {
    id: T,
}

/// PostgREST client for the project's tables.
/// One instance implements every persistence port.
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseClient {
    /// Create a client for the project at `url` (e.g. `https://xyz.supabase.co`)
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
    }

    /// Send a request and decode the returned rows
    async fn rows<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StoreError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::ParseError(e.to_string()))
    }

    async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(table, "Inserting row");
        self.rows(self.request(Method::POST, table).json(body))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("inserted {table} row")))
    }

    async fn update<B>(&self, table: &str, id: &str, body: &B) -> Result<(), StoreError>
    where
        B: Serialize + Sync,
    {
        debug!(table, id, "Updating row");
        let updated: Vec<serde_json::Value> = self
            .rows(
                self.request(Method::PATCH, table)
                    .query(&[("id", format!("eq.{id}"))])
                    .json(body),
            )
            .await?;

        if updated.is_empty() {
            return Err(StoreError::NotFound(format!("{table} {id}")));
        }
        Ok(())
    }

    async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
        columns: &str,
    ) -> Result<Option<T>, StoreError> {
        let rows: Vec<T> = self
            .rows(self.request(Method::GET, table).query(&[
                (column, format!("eq.{value}")),
                ("select", columns.to_string()),
                ("limit", "1".to_string()),
            ]))
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl MeetingStore for SupabaseClient {
    async fn create_meeting(&self, meeting: &NewMeeting) -> Result<MeetingRecord, StoreError> {
        self.insert(MEETINGS, meeting).await
    }

    async fn update_meeting(&self, id: &MeetingId, update: &MeetingUpdate) -> Result<(), StoreError> {
        self.update(MEETINGS, id.as_str(), update).await
    }

    async fn get_meeting(&self, id: &MeetingId) -> Result<Option<MeetingRecord>, StoreError> {
        self.select_one(MEETINGS, "id", id.as_str(), "*").await
    }
}

#[async_trait]
impl SubscriptionStore for SupabaseClient {
    async fn get_subscription(
        &self,
        user_id: &str,
    ) -> Result<Option<SubscriptionSnapshot>, StoreError> {
        self.select_one(SUBSCRIPTIONS, "user_id", user_id, SUBSCRIPTION_COLUMNS)
            .await
    }
}

#[async_trait]
impl TaskStore for SupabaseClient {
    async fn create_task(&self, task: &NewTask) -> Result<TaskId, StoreError> {
        let row: IdRow<TaskId> = self.insert(TASKS, task).await?;
        Ok(row.id)
    }

    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> Result<(), StoreError> {
        self.update(TASKS, id.as_str(), update).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<UploadTask>, StoreError> {
        self.select_one(TASKS, "id", id.as_str(), "*").await
    }
}

#[async_trait]
impl SettingsStore for SupabaseClient {
    async fn get_settings(&self, user_id: &str) -> Result<Option<UserSettings>, StoreError> {
        self.select_one(SETTINGS, "user_id", user_id, SETTINGS_COLUMNS)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meeting::TaskStatus;
    use crate::domain::subscription::PlanType;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client() -> (MockServer, SupabaseClient) {
        let server = MockServer::start().await;
        let client = SupabaseClient::new(format!("{}/", server.uri()), "anon-key");
        (server, client)
    }

    #[tokio::test]
    async fn create_meeting_posts_row_with_headers() {
        let (server, client) = client().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/meetings"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!({
                "user_id": "u1",
                "title": "Upload du 19/10/2026",
                "transcript": null,
                "summary": null,
                "duration": 180,
                "notes": null,
                "suggestions": [],
                "audio_url": null
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
                "id": "m-1",
                "user_id": "u1",
                "title": "Upload du 19/10/2026",
                "transcript": null,
                "summary": null,
                "duration": 180,
                "notes": null,
                "suggestions": [],
                "audio_url": null,
                "created_at": "2026-10-19T10:00:00Z"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let record = client
            .create_meeting(&NewMeeting::provisional("u1", "Upload du 19/10/2026", 180, None))
            .await
            .unwrap();

        assert_eq!(record.id.as_str(), "m-1");
        assert!(record.is_provisional());
    }

    #[tokio::test]
    async fn update_meeting_patches_by_id() {
        let (server, client) = client().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/meetings"))
            .and(query_param("id", "eq.m-1"))
            .and(body_json(json!({"transcript": "Bonjour", "duration": 61})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "m-1"}])))
            .expect(1)
            .mount(&server)
            .await;

        let update = MeetingUpdate {
            transcript: Some("Bonjour".to_string()),
            duration: Some(61),
            ..Default::default()
        };
        client
            .update_meeting(&MeetingId::new("m-1"), &update)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let (server, client) = client().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client
            .update_task(&TaskId::new("t-9"), &TaskUpdate::failed("boom"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn subscription_absent_row_is_none() {
        let (server, client) = client().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_subscriptions"))
            .and(query_param("user_id", "eq.u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        assert!(client.get_subscription("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn subscription_row_is_parsed() {
        let (server, client) = client().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/user_subscriptions"))
            .and(query_param("select", SUBSCRIPTION_COLUMNS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "plan_type": "starter",
                "minutes_quota": 600,
                "minutes_used_this_month": 550
            }])))
            .mount(&server)
            .await;

        let sub = client.get_subscription("u1").await.unwrap().unwrap();
        assert_eq!(sub.plan_type, PlanType::Starter);
        assert_eq!(sub.remaining_minutes(), 50);
    }

    #[tokio::test]
    async fn create_task_returns_id() {
        let (server, client) = client().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/background_tasks"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
                "id": "t-1",
                "user_id": "u1",
                "type": "upload_transcription",
                "status": "processing",
                "progress": "Démarrage du traitement...",
                "progress_percent": 0,
                "meeting_id": null,
                "error": null
            }])))
            .mount(&server)
            .await;

        let id = client
            .create_task(&NewTask::upload("u1", "Démarrage du traitement..."))
            .await
            .unwrap();
        assert_eq!(id.as_str(), "t-1");
    }

    #[tokio::test]
    async fn get_task_parses_status() {
        let (server, client) = client().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/background_tasks"))
            .and(query_param("id", "eq.t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "t-1",
                "user_id": "u1",
                "type": "upload_transcription",
                "status": "completed",
                "progress": "Transcription terminée",
                "progress_percent": 100,
                "meeting_id": "m-1",
                "error": null
            }])))
            .mount(&server)
            .await;

        let task = client.get_task(&TaskId::new("t-1")).await.unwrap().unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.ready_meeting().map(MeetingId::as_str), Some("m-1"));
    }

    #[tokio::test]
    async fn http_error_is_api_error() {
        let (server, client) = client().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("JWT expired"))
            .mount(&server)
            .await;

        let err = client.get_settings("u1").await.unwrap_err();
        match err {
            StoreError::ApiError { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "JWT expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
