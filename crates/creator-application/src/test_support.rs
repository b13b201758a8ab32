//! Scripted backend for coordinator tests.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use creator_core::backend::CreatorBackend;
use creator_core::content::{ContentDraft, DraftRequest, GeneratedContent};
use creator_core::error::{CreatorError, Result};
use creator_core::plan::{DailyPlan, PlanItem};
use creator_core::profile::{Profile, ProfileDraft};
use creator_core::{FixedClock, Session};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap())
}

pub fn ava() -> Session {
    Session::new("u-ava", "Ava")
}

pub fn plan_item(platform: &str, content_type: &str, topic: &str) -> PlanItem {
    PlanItem {
        platform: platform.to_string(),
        content_type: content_type.to_string(),
        topic: topic.to_string(),
        reasoning: String::new(),
    }
}

pub fn plan(user_id: &str, date: NaiveDate, items: Vec<PlanItem>) -> DailyPlan {
    DailyPlan {
        id: Some(format!("plan-{}", date)),
        user_id: user_id.to_string(),
        date,
        items,
        generated_at: None,
    }
}

pub fn content(hooks: &[&str]) -> GeneratedContent {
    GeneratedContent::new(
        hooks.iter().map(|h| h.to_string()).collect(),
        "Script",
        "Caption",
    )
    .unwrap()
}

pub fn draft(id: &str, day: u32) -> ContentDraft {
    ContentDraft {
        id: id.to_string(),
        user_id: "u-ava".to_string(),
        platform: "Instagram".to_string(),
        content_type: "Reel".to_string(),
        hooks: vec!["Hook".to_string()],
        script: "Script".to_string(),
        caption: "Caption".to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 2, day, 12, 0, 0).unwrap(),
        posted: false,
    }
}

#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<&'static str>>,
    profiles: Mutex<HashMap<String, Profile>>,
    today_plan: Mutex<Option<DailyPlan>>,
    next_plans: Mutex<VecDeque<Result<DailyPlan>>>,
    next_content: Mutex<VecDeque<Result<GeneratedContent>>>,
    history: Mutex<Vec<ContentDraft>>,
    last_request: Mutex<Option<DraftRequest>>,
    failure: Mutex<Option<CreatorError>>,
    delay: Mutex<Option<Duration>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, session: &Session) -> Self {
        self.profiles.lock().unwrap().insert(
            session.user_id.clone(),
            Profile {
                id: session.user_id.clone(),
                name: session.display_name.clone(),
                niche: "Fitness".to_string(),
                tone: Default::default(),
                target_audience: "Millennials".to_string(),
                platforms: Default::default(),
                created_at: None,
            },
        );
        self
    }

    pub fn set_today_plan(&self, plan: Option<DailyPlan>) {
        *self.today_plan.lock().unwrap() = plan;
    }

    pub fn push_plan(&self, result: Result<DailyPlan>) {
        self.next_plans.lock().unwrap().push_back(result);
    }

    pub fn push_content(&self, result: Result<GeneratedContent>) {
        self.next_content.lock().unwrap().push_back(result);
    }

    pub fn set_history(&self, drafts: Vec<ContentDraft>) {
        *self.history.lock().unwrap() = drafts;
    }

    /// Every subsequent call fails with `err`.
    pub fn fail_with(&self, err: Option<CreatorError>) {
        *self.failure.lock().unwrap() = err;
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    pub fn last_request(&self) -> Option<DraftRequest> {
        self.last_request.lock().unwrap().clone()
    }

    async fn enter(&self, call: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn known(&self, user_id: &str) -> Result<()> {
        if self.profiles.lock().unwrap().contains_key(user_id) {
            Ok(())
        } else {
            Err(CreatorError::not_found("user", user_id))
        }
    }
}

#[async_trait]
impl CreatorBackend for MockBackend {
    async fn health(&self) -> Result<String> {
        self.enter("health").await?;
        Ok("ok".to_string())
    }

    async fn create_profile(&self, draft: &ProfileDraft) -> Result<Profile> {
        draft.validate()?;
        self.enter("create_profile").await?;
        let profile = Profile {
            id: format!("u-{}", draft.name.trim().to_lowercase()),
            name: draft.name.trim().to_string(),
            niche: draft.niche.clone(),
            tone: draft.tone,
            target_audience: draft.target_audience.clone(),
            platforms: draft.platforms.clone(),
            created_at: None,
        };
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn fetch_profile(&self, user_id: &str) -> Result<Profile> {
        self.enter("fetch_profile").await?;
        self.profiles
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| CreatorError::not_found("user", user_id))
    }

    async fn fetch_today_plan(&self, user_id: &str) -> Result<Option<DailyPlan>> {
        self.enter("fetch_today_plan").await?;
        self.known(user_id)?;
        Ok(self.today_plan.lock().unwrap().clone())
    }

    async fn generate_plan(&self, user_id: &str) -> Result<DailyPlan> {
        self.enter("generate_plan").await?;
        self.known(user_id)?;
        let next = self
            .next_plans
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(plan(
                    user_id,
                    today(),
                    vec![plan_item("Instagram", "Reel", "Default")],
                ))
            });
        if let Ok(plan) = &next {
            *self.today_plan.lock().unwrap() = Some(plan.clone());
        }
        next
    }

    async fn generate_content(&self, request: &DraftRequest) -> Result<GeneratedContent> {
        self.enter("generate_content").await?;
        self.known(request.user_id())?;
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.next_content
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(content(&["Hook A", "Hook B"])))
    }

    async fn fetch_history(&self, user_id: &str) -> Result<Vec<ContentDraft>> {
        self.enter("fetch_history").await?;
        self.known(user_id)?;
        Ok(self.history.lock().unwrap().clone())
    }
}
