//! Content draft generation: the form, the generated result and copying.

use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

use creator_core::backend::CreatorBackend;
use creator_core::catalog::{ContentType, Platform, ensure_pairing};
use creator_core::content::{DraftRequest, GeneratedContent};
use creator_core::error::{CreatorError, Result};
use creator_core::plan::PlanItem;
use creator_core::session::Session;

use crate::gate::RequestGate;
use crate::notice::{Notice, Outcome};

const GENERATE_FAILED: &str = "Failed to generate content. Please try again.";

/// Destination for copy actions. Copying never fails from the caller's view.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str);
}

/// Keeps everything copied, newest last.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    entries: StdMutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(text.to_string());
    }
}

/// Draft form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftForm {
    pub platform: Platform,
    pub content_type: ContentType,
    pub context: String,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self {
            platform: Platform::Instagram,
            content_type: Platform::Instagram.default_content_type(),
            context: String::new(),
        }
    }
}

impl DraftForm {
    /// Switches platform and resets the content type to the platform's first.
    pub fn select_platform(&mut self, platform: Platform) {
        self.platform = platform;
        self.content_type = platform.default_content_type();
    }

    pub fn select_content_type(&mut self, content_type: ContentType) -> Result<()> {
        ensure_pairing(self.platform, content_type)?;
        self.content_type = content_type;
        Ok(())
    }

    pub fn to_request(&self, session: &Session) -> Result<DraftRequest> {
        DraftRequest::new(
            session.user_id.clone(),
            self.platform,
            self.content_type,
            Some(self.context.clone()),
        )
    }
}

/// Which screen of the generator is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftStage {
    Form,
    Generating,
    Result,
}

#[derive(Debug, Default)]
struct DraftState {
    user_id: Option<String>,
    form: DraftForm,
    content: Option<GeneratedContent>,
    selected_hook: usize,
    showing_result: bool,
    notice: Option<Notice>,
}

pub struct DraftCoordinator {
    backend: Arc<dyn CreatorBackend>,
    clipboard: Arc<dyn Clipboard>,
    gate: RequestGate,
    state: Mutex<DraftState>,
}

impl DraftCoordinator {
    pub fn new(backend: Arc<dyn CreatorBackend>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            backend,
            clipboard,
            gate: RequestGate::new(),
            state: Mutex::new(DraftState::default()),
        }
    }

    pub async fn form(&self) -> DraftForm {
        self.state.lock().await.form.clone()
    }

    pub async fn stage(&self) -> DraftStage {
        let state = self.state.lock().await;
        if self.gate.is_busy() {
            DraftStage::Generating
        } else if state.showing_result && state.content.is_some() {
            DraftStage::Result
        } else {
            DraftStage::Form
        }
    }

    pub async fn content(&self) -> Option<GeneratedContent> {
        self.state.lock().await.content.clone()
    }

    pub async fn selected_hook(&self) -> usize {
        self.state.lock().await.selected_hook
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    pub async fn select_platform(&self, platform: Platform) {
        self.state.lock().await.form.select_platform(platform);
    }

    pub async fn select_content_type(&self, content_type: ContentType) -> Result<()> {
        self.state.lock().await.form.select_content_type(content_type)
    }

    pub async fn set_context(&self, context: impl Into<String>) {
        self.state.lock().await.form.context = context.into();
    }

    /// Seeds the form from a plan suggestion and shows the form.
    ///
    /// A content type the platform does not offer falls back to the
    /// platform's default. An unknown platform leaves the form untouched.
    pub async fn prefill_from_plan_item(&self, item: &PlanItem) -> Outcome {
        let Some(platform) = item.platform() else {
            let notice = Notice::validation(format!(
                "Unsupported platform '{}' in plan item",
                item.platform
            ));
            self.state.lock().await.notice = Some(notice.clone());
            return Outcome::Failed(notice);
        };

        let content_type = item
            .content_type()
            .filter(|ct| platform.supports(*ct))
            .unwrap_or_else(|| {
                tracing::debug!(
                    "[DraftCoordinator] '{}' is not offered on {}, using {}",
                    item.content_type,
                    platform,
                    platform.default_content_type()
                );
                platform.default_content_type()
            });

        let mut state = self.state.lock().await;
        state.form = DraftForm {
            platform,
            content_type,
            context: item.topic.clone(),
        };
        state.showing_result = false;
        Outcome::Applied
    }

    /// Generates hooks, script and caption from the current form.
    pub async fn generate(&self, session: &Session) -> Outcome {
        self.scope_to(session).await;

        let request = {
            let mut state = self.state.lock().await;
            match state.form.to_request(session) {
                Ok(request) => request,
                Err(e) => {
                    let notice = Notice::from_error(&e, GENERATE_FAILED);
                    state.notice = Some(notice.clone());
                    return Outcome::Failed(notice);
                }
            }
        };

        let Some(token) = self.gate.try_begin() else {
            tracing::debug!("[DraftCoordinator] generate ignored, request outstanding");
            return Outcome::Busy;
        };
        self.state.lock().await.notice = None;

        let result = self.backend.generate_content(&request).await;
        if !token.is_current() {
            return Outcome::Stale;
        }

        let mut state = self.state.lock().await;
        match result {
            Ok(content) => {
                tracing::info!(
                    "[DraftCoordinator] Generated {} hooks for {} {}",
                    content.hooks.len(),
                    request.platform(),
                    request.content_type()
                );
                state.content = Some(content);
                state.selected_hook = 0;
                state.showing_result = true;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!("[DraftCoordinator] Content generation failed: {}", e);
                let outcome = Outcome::from_error(&e, GENERATE_FAILED);
                if let Some(notice) = outcome.notice() {
                    state.notice = Some(notice.clone());
                }
                outcome
            }
        }
    }

    /// Changes the highlighted hook. Never regenerates.
    pub async fn select_hook(&self, index: usize) -> Result<()> {
        let mut state = self.state.lock().await;
        let count = state.content.as_ref().map_or(0, |c| c.hooks.len());
        if index >= count {
            return Err(CreatorError::validation(format!(
                "Hook {} does not exist ({} available)",
                index + 1,
                count
            )));
        }
        state.selected_hook = index;
        Ok(())
    }

    /// Copies the selected hook. Returns `false` when there is nothing to copy.
    pub async fn copy_hook(&self) -> bool {
        let text = {
            let state = self.state.lock().await;
            state
                .content
                .as_ref()
                .and_then(|c| c.hooks.get(state.selected_hook).cloned())
        };
        self.copy(text)
    }

    pub async fn copy_script(&self) -> bool {
        let text = self.state.lock().await.content.as_ref().map(|c| c.script.clone());
        self.copy(text)
    }

    pub async fn copy_caption(&self) -> bool {
        let text = self.state.lock().await.content.as_ref().map(|c| c.caption.clone());
        self.copy(text)
    }

    /// Back to the form with the current values kept.
    pub async fn start_over(&self) {
        self.state.lock().await.showing_result = false;
    }

    /// Forgets everything, discarding any response still in flight.
    pub async fn reset(&self) {
        self.gate.invalidate();
        *self.state.lock().await = DraftState::default();
    }

    fn copy(&self, text: Option<String>) -> bool {
        match text {
            Some(text) if !text.is_empty() => {
                self.clipboard.copy(&text);
                true
            }
            _ => false,
        }
    }

    async fn scope_to(&self, session: &Session) {
        let mut state = self.state.lock().await;
        if state.user_id.as_deref() != Some(session.user_id.as_str()) {
            if state.user_id.is_some() {
                tracing::info!("[DraftCoordinator] Session changed, dropping draft");
                self.gate.invalidate();
                let form = state.form.clone();
                *state = DraftState {
                    form,
                    ..DraftState::default()
                };
            }
            state.user_id = Some(session.user_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;
    use crate::test_support::{MockBackend, ava, content, plan_item};
    use strum::IntoEnumIterator;

    fn coordinator(backend: Arc<MockBackend>) -> (DraftCoordinator, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        (DraftCoordinator::new(backend, clipboard.clone()), clipboard)
    }

    #[tokio::test]
    async fn test_form_defaults_and_platform_reset() {
        let (coordinator, _) = coordinator(Arc::new(MockBackend::new()));
        let form = coordinator.form().await;
        assert_eq!(form.platform, Platform::Instagram);
        assert_eq!(form.content_type, ContentType::Reel);

        coordinator.select_platform(Platform::YouTube).await;
        assert_eq!(coordinator.form().await.content_type, ContentType::Short);
    }

    #[tokio::test]
    async fn test_invalid_pairing_rejected_before_dispatch() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        let (coordinator, _) = coordinator(backend.clone());

        for platform in Platform::iter() {
            for content_type in ContentType::iter().filter(|ct| !platform.supports(*ct)) {
                let mut form = DraftForm::default();
                form.select_platform(platform);
                assert!(form.select_content_type(content_type).is_err());

                form.content_type = content_type;
                coordinator.state.lock().await.form = form;
                let outcome = coordinator.generate(&ava()).await;
                assert_eq!(outcome.notice().unwrap().kind, NoticeKind::Validation);
            }
        }
        assert_eq!(backend.call_count("generate_content"), 0);
    }

    #[tokio::test]
    async fn test_blank_user_rejected_before_dispatch() {
        let backend = Arc::new(MockBackend::new());
        let (coordinator, _) = coordinator(backend.clone());

        let outcome = coordinator.generate(&Session::new("", "Ava")).await;
        assert_eq!(outcome.notice().unwrap().kind, NoticeKind::Validation);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_generate_replaces_content_and_resets_selection() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        backend.push_content(Ok(content(&["One", "Two", "Three"])));
        backend.push_content(Ok(content(&["Hook A", "Hook B"])));
        let (coordinator, _) = coordinator(backend);

        coordinator.generate(&ava()).await;
        coordinator.select_hook(2).await.unwrap();
        assert_eq!(coordinator.selected_hook().await, 2);

        coordinator.start_over().await;
        assert_eq!(coordinator.generate(&ava()).await, Outcome::Applied);
        assert_eq!(coordinator.selected_hook().await, 0);
        assert_eq!(coordinator.content().await.unwrap().hooks, vec!["Hook A", "Hook B"]);
        assert_eq!(coordinator.stage().await, DraftStage::Result);
    }

    #[tokio::test]
    async fn test_select_hook_is_bounds_checked_and_never_generates() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        let (coordinator, _) = coordinator(backend.clone());
        assert!(coordinator.select_hook(0).await.is_err());

        coordinator.generate(&ava()).await;
        assert!(coordinator.select_hook(1).await.is_ok());
        assert!(coordinator.select_hook(2).await.unwrap_err().is_validation());
        assert_eq!(coordinator.selected_hook().await, 1);
        assert_eq!(backend.call_count("generate_content"), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_draft() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        backend.push_content(Err(CreatorError::invalid_response("no hooks")));
        let (coordinator, _) = coordinator(backend.clone());

        backend.push_content(Ok(content(&["Kept"])));
        assert!(matches!(coordinator.generate(&ava()).await, Outcome::Failed(_)));
        assert!(coordinator.content().await.is_none());

        assert!(coordinator.generate(&ava()).await.is_applied());
        backend.fail_with(Some(CreatorError::network("reset")));
        let outcome = coordinator.generate(&ava()).await;

        assert_eq!(
            outcome.notice().unwrap().message,
            "Failed to generate content. Please try again."
        );
        assert_eq!(coordinator.content().await.unwrap().hooks, vec!["Kept"]);
        assert_eq!(coordinator.stage().await, DraftStage::Result);
    }

    #[tokio::test]
    async fn test_prefill_from_plan_item() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        let (coordinator, _) = coordinator(backend.clone());

        let outcome = coordinator
            .prefill_from_plan_item(&plan_item("Instagram", "Reel", "Morning stretch routine"))
            .await;
        assert!(outcome.is_applied());
        coordinator.generate(&ava()).await;

        let request = backend.last_request().unwrap();
        assert_eq!(request.platform(), Platform::Instagram);
        assert_eq!(request.content_type(), ContentType::Reel);
        assert_eq!(request.context(), Some("Morning stretch routine"));
    }

    #[tokio::test]
    async fn test_prefill_falls_back_to_platform_default() {
        let (coordinator, _) = coordinator(Arc::new(MockBackend::new()));
        coordinator
            .prefill_from_plan_item(&plan_item("TikTok", "Carousel", "Dance"))
            .await;
        let form = coordinator.form().await;
        assert_eq!(form.platform, Platform::TikTok);
        assert_eq!(form.content_type, Platform::TikTok.default_content_type());
        assert_eq!(form.context, "Dance");
    }

    #[tokio::test]
    async fn test_prefill_unknown_platform_is_validation() {
        let (coordinator, _) = coordinator(Arc::new(MockBackend::new()));
        let outcome = coordinator
            .prefill_from_plan_item(&plan_item("Myspace", "Post", "Retro"))
            .await;
        assert_eq!(outcome.notice().unwrap().kind, NoticeKind::Validation);
        assert_eq!(coordinator.form().await, DraftForm::default());
    }

    #[tokio::test]
    async fn test_copy_actions() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        let (coordinator, clipboard) = coordinator(backend);
        assert!(!coordinator.copy_hook().await);

        coordinator.generate(&ava()).await;
        coordinator.select_hook(1).await.unwrap();
        assert!(coordinator.copy_hook().await);
        assert_eq!(clipboard.last().as_deref(), Some("Hook B"));

        assert!(coordinator.copy_caption().await);
        assert_eq!(clipboard.last().as_deref(), Some("Caption"));
        assert!(coordinator.copy_script().await);
        assert_eq!(clipboard.last().as_deref(), Some("Script"));
    }

    #[tokio::test]
    async fn test_start_over_keeps_form_values() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        let (coordinator, _) = coordinator(backend);
        coordinator.select_platform(Platform::TikTok).await;
        coordinator.set_context("Leg day").await;
        coordinator.generate(&ava()).await;

        coordinator.start_over().await;
        assert_eq!(coordinator.stage().await, DraftStage::Form);
        let form = coordinator.form().await;
        assert_eq!(form.platform, Platform::TikTok);
        assert_eq!(form.context, "Leg day");
    }

    #[tokio::test]
    async fn test_cancelled_generate_returns_to_previous_result() {
        let backend = Arc::new(MockBackend::new().with_user(&ava()));
        let (coordinator, _) = coordinator(backend.clone());
        coordinator.generate(&ava()).await;

        backend.set_delay(Some(std::time::Duration::from_millis(200)));
        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            coordinator.generate(&ava()),
        )
        .await;
        assert!(cancelled.is_err());

        assert_eq!(coordinator.stage().await, DraftStage::Result);
        assert_eq!(coordinator.content().await, Some(content(&["Hook A", "Hook B"])));
    }
}
