//! reqwest implementation of [`CreatorBackend`].

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use creator_core::backend::CreatorBackend;
use creator_core::content::{ContentDraft, DraftRequest, GeneratedContent, sort_newest_first};
use creator_core::error::{CreatorError, Result};
use creator_core::plan::DailyPlan;
use creator_core::profile::{Profile, ProfileDraft};

use crate::config::ClientConfig;
use crate::dto::{
    ContentItemDto, CreateProfileRequest, DailyPlanDto, GenerateContentRequest,
    GeneratePlanRequest, HealthResponse, ProfileDto,
};

/// Talks to the Creator OS HTTP API under `<base_url>/api`.
#[derive(Debug, Clone)]
pub struct HttpCreatorBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpCreatorBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("creator-os/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CreatorError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::new(&config.backend_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn transport_error(&self, err: reqwest::Error) -> CreatorError {
        if err.is_timeout() {
            CreatorError::Timeout(self.timeout)
        } else if err.is_decode() {
            CreatorError::invalid_response(err.to_string())
        } else {
            CreatorError::network(err.to_string())
        }
    }

    /// Sends the request under the configured timeout and maps non-2xx
    /// statuses. A 404 becomes `NotFound` for `user_id` when given.
    async fn send(&self, request: RequestBuilder, user_id: Option<&str>) -> Result<Response> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = user_id {
                return Err(CreatorError::not_found("user", id));
            }
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!("[HttpBackend] Backend returned {}: {}", status, body);
        Err(CreatorError::Backend {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_body(&self, response: Response) -> Result<Vec<u8>> {
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        Ok(bytes.to_vec())
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        parse_json(&self.read_body(response).await?)
    }
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| CreatorError::invalid_response(format!("Unexpected response body: {}", e)))
}

#[async_trait]
impl CreatorBackend for HttpCreatorBackend {
    async fn health(&self) -> Result<String> {
        tracing::debug!("[HttpBackend] GET /api/");
        let response = self.send(self.client.get(self.url("/")), None).await?;
        let health: HealthResponse = self.decode(response).await?;
        Ok(health.message)
    }

    async fn create_profile(&self, draft: &ProfileDraft) -> Result<Profile> {
        draft.validate()?;

        tracing::debug!("[HttpBackend] POST /api/users name={}", draft.name.trim());
        let body = CreateProfileRequest::from(draft);
        let response = self
            .send(self.client.post(self.url("/users")).json(&body), None)
            .await?;
        let dto: ProfileDto = self.decode(response).await?;
        dto.into_domain()
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile> {
        tracing::debug!("[HttpBackend] GET /api/users/{}", user_id);
        let response = self
            .send(
                self.client.get(self.url(&format!("/users/{}", user_id))),
                Some(user_id),
            )
            .await?;
        let dto: ProfileDto = self.decode(response).await?;
        dto.into_domain()
    }

    async fn fetch_today_plan(&self, user_id: &str) -> Result<Option<DailyPlan>> {
        tracing::debug!("[HttpBackend] GET /api/daily-plan/today/{}", user_id);
        let response = self
            .send(
                self.client
                    .get(self.url(&format!("/daily-plan/today/{}", user_id))),
                Some(user_id),
            )
            .await?;

        let body = self.read_body(response).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let dto: Option<DailyPlanDto> = parse_json(&body)?;
        dto.map(|plan| plan.into_domain(user_id, Utc::now().date_naive()))
            .transpose()
    }

    async fn generate_plan(&self, user_id: &str) -> Result<DailyPlan> {
        tracing::debug!("[HttpBackend] POST /api/daily-plan/generate user={}", user_id);
        let body = GeneratePlanRequest {
            user_id: user_id.to_string(),
        };
        let response = self
            .send(
                self.client.post(self.url("/daily-plan/generate")).json(&body),
                Some(user_id),
            )
            .await?;
        let dto: DailyPlanDto = self.decode(response).await?;
        dto.into_domain(user_id, Utc::now().date_naive())
    }

    async fn generate_content(&self, request: &DraftRequest) -> Result<GeneratedContent> {
        tracing::debug!(
            "[HttpBackend] POST /api/content/generate {} {}",
            request.platform(),
            request.content_type()
        );
        let body = GenerateContentRequest::from(request);
        let response = self
            .send(
                self.client.post(self.url("/content/generate")).json(&body),
                Some(request.user_id()),
            )
            .await?;
        let dto: ContentItemDto = self.decode(response).await?;
        dto.into_generated()
    }

    async fn fetch_history(&self, user_id: &str) -> Result<Vec<ContentDraft>> {
        tracing::debug!("[HttpBackend] GET /api/content/history/{}", user_id);
        let request = self
            .client
            .get(self.url(&format!("/content/history/{}", user_id)));
        let response = self.send(request, Some(user_id)).await?;
        let items: Vec<ContentItemDto> = self.decode(response).await?;
        let mut drafts = items
            .into_iter()
            .map(|item| item.into_draft(user_id))
            .collect::<Result<Vec<_>>>()?;
        sort_newest_first(&mut drafts);
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use creator_core::catalog::{ContentType, Platform, Tone};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn profile_json(id: &str) -> Value {
        json!({
            "id": id,
            "name": "Ava",
            "niche": "Fitness",
            "tone": "Casual",
            "target_audience": "Millennials",
            "platforms": ["Instagram"],
            "created_at": "2025-03-01T08:30:00.000000"
        })
    }

    fn fake_backend() -> Router {
        Router::new()
            .route(
                "/api/",
                get(|| async { Json(json!({"message": "Creator Operating System API"})) }),
            )
            .route(
                "/api/users/{id}",
                get(|Path(id): Path<String>| async move {
                    if id == "u-1" {
                        Ok(Json(profile_json(&id)))
                    } else {
                        Err((StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))))
                    }
                }),
            )
            .route(
                "/api/daily-plan/today/{id}",
                get(|| async { Json(Value::Null) }),
            )
            .route(
                "/api/daily-plan/generate",
                post(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"detail": "Failed to generate plan"})),
                    )
                }),
            )
            .route(
                "/api/content/generate",
                post(|Json(body): Json<Value>| async move {
                    let context = body["additional_context"].as_str().unwrap_or("nothing");
                    let first_hook = format!("About {}", context);
                    Json(json!({
                        "id": "c-1",
                        "user_id": body["user_id"],
                        "platform": body["platform"],
                        "content_type": body["content_type"],
                        "hooks": [first_hook, "Hook B"],
                        "script": "Script",
                        "caption": "Caption",
                        "created_at": "2025-03-01T09:00:00",
                        "posted": false
                    }))
                }),
            )
            .route("/api/content/history/{id}", get(history))
            .route(
                "/api/users",
                post(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(profile_json("u-slow"))
                }),
            )
    }

    async fn history(
        Path(id): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        let all = vec![
            json!({"id": "old", "user_id": id, "platform": "TikTok", "content_type": "Video",
                   "hooks": ["h"], "script": "", "caption": "c", "created_at": "2025-02-01T09:00:00"}),
            json!({"id": "new", "user_id": id, "platform": "Instagram", "content_type": "Reel",
                   "hooks": ["h"], "script": "s", "caption": "c", "created_at": "2025-03-01T09:00:00"}),
        ];
        let limit = params
            .get("limit")
            .and_then(|l| l.parse::<usize>().ok())
            .unwrap_or(all.len());
        Json(Value::Array(all.into_iter().take(limit).collect()))
    }

    async fn backend() -> HttpCreatorBackend {
        let url = spawn(fake_backend()).await;
        HttpCreatorBackend::new(url, Duration::from_millis(300)).unwrap()
    }

    fn ava_draft() -> ProfileDraft {
        ProfileDraft::new("Ava", "Fitness", Tone::Casual, "Millennials", [Platform::Instagram])
    }

    #[tokio::test]
    async fn test_health() {
        let backend = backend().await;
        assert_eq!(
            backend.health().await.unwrap(),
            "Creator Operating System API"
        );
    }

    #[tokio::test]
    async fn test_fetch_profile() {
        let backend = backend().await;
        let profile = backend.fetch_profile("u-1").await.unwrap();
        assert_eq!(profile.name, "Ava");
        assert_eq!(profile.tone, Tone::Casual);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let backend = backend().await;
        let err = backend.fetch_profile("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_null_plan_is_none() {
        let backend = backend().await;
        assert!(backend.fetch_today_plan("u-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_carries_status_and_body() {
        let backend = backend().await;
        match backend.generate_plan("u-1").await {
            Err(CreatorError::Backend { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("Failed to generate plan"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_content_sends_labels_and_context() {
        let backend = backend().await;
        let request = DraftRequest::new(
            "u-1",
            Platform::Instagram,
            ContentType::Reel,
            Some("Morning stretch routine".to_string()),
        )
        .unwrap();

        let content = backend.generate_content(&request).await.unwrap();
        assert_eq!(content.hooks[0], "About Morning stretch routine");
        assert_eq!(content.hooks.len(), 2);
        assert_eq!(content.caption, "Caption");
    }

    #[tokio::test]
    async fn test_history_sorted_newest_first() {
        let backend = backend().await;
        let history = backend.fetch_history("u-1").await.unwrap();
        let ids: Vec<_> = history.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_history_from_config_is_full_set() {
        let url = spawn(fake_backend()).await;
        let config = ClientConfig::default().with_backend_url(url);
        let backend = HttpCreatorBackend::from_config(&config).unwrap();

        // The fake truncates when a `limit` query is present.
        let history = backend.fetch_history("u-1").await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let backend = backend().await;
        let err = backend.create_profile(&ava_draft()).await.unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {:?}", err);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_before_dispatch() {
        // Nothing listens on port 9; a dispatched request would be a Network error.
        let backend =
            HttpCreatorBackend::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let mut draft = ava_draft();
        draft.name = "  ".to_string();

        let err = backend.create_profile(&draft).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let backend =
            HttpCreatorBackend::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = backend.health().await.unwrap_err();
        assert!(matches!(err, CreatorError::Network(_)));
    }
}
