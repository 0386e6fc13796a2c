//! Analysis request controller.
//!
//! Drives one user-initiated cycle: check the surface, validate input, show a
//! busy trigger, run a bounded backend call, and hand the result to the
//! surface. Every exit path after the trigger is disabled restores it.

use crate::backend::{AnalysisBackend, BackendError};
use crate::error::{generic_server_message, CheckError};
use crate::models::{AnalysisRequest, AnalysisResponse, RequestState, SubmissionKind};
use crate::render::{build_view, ResultView};
use crate::surface::{required_roles, NoticeLevel, Surface};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Label shown on the trigger while a request is in flight.
pub const BUSY_LABEL: &str = "Processing...";

/// How long a request may run before it is abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest submission preview kept for reports.
const PREVIEW_CHARS: usize = 80;

/// Raw user input plus which control it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: SubmissionKind,
    pub input: String,
}

impl Submission {
    pub fn text(input: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Text,
            input: input.into(),
        }
    }

    pub fn link(input: impl Into<String>) -> Self {
        Self {
            kind: SubmissionKind::Link,
            input: input.into(),
        }
    }

    /// Treat `line` as a link when it looks like one, text otherwise.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        if line.starts_with("http://") || line.starts_with("https://") {
            Self::link(line)
        } else {
            Self::text(line)
        }
    }

    /// Short single-line form of the input for reports.
    pub fn preview(&self) -> String {
        let flat: String = self
            .input
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();

        if flat.chars().count() > PREVIEW_CHARS {
            let head: String = flat.chars().take(PREVIEW_CHARS).collect();
            format!("{}…", head.trim_end())
        } else {
            flat
        }
    }
}

/// Validate a submission and build the request body.
pub fn validate(submission: &Submission) -> Result<AnalysisRequest, CheckError> {
    let content = submission.input.trim();

    match submission.kind {
        SubmissionKind::Text => {
            if content.is_empty() {
                return Err(CheckError::validation("Please enter the news text"));
            }
        }
        SubmissionKind::Link => {
            if content.is_empty() {
                return Err(CheckError::validation("Please enter a news URL"));
            }
            if url::Url::parse(content).is_err() {
                return Err(CheckError::validation("Invalid URL format"));
            }
        }
    }

    Ok(AnalysisRequest {
        content: content.to_string(),
    })
}

/// Controller settings.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// A successful cycle.
#[derive(Debug, Clone)]
pub struct Completed {
    pub response: AnalysisResponse,
    pub view: ResultView,
    pub elapsed: Duration,
}

/// Owns one backend, one surface, and the state of the current cycle.
pub struct AnalysisController<B, S> {
    backend: B,
    surface: S,
    config: ControllerConfig,
    state: RequestState,
}

impl<B: AnalysisBackend, S: Surface> AnalysisController<B, S> {
    pub fn new(backend: B, surface: S, config: ControllerConfig) -> Self {
        Self {
            backend,
            surface,
            config,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    #[cfg(test)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one cycle for `submission`.
    ///
    /// Returns `Ok(None)` without doing anything when the trigger control is
    /// disabled. Errors have already been shown on the surface when returned.
    pub async fn submit(&mut self, submission: Submission) -> Result<Option<Completed>, CheckError> {
        if !self.surface.trigger_enabled(submission.kind) {
            debug!("Ignoring {} submission: trigger disabled", submission.kind);
            return Ok(None);
        }

        self.state = RequestState::Idle;

        let result = self.run(&submission).await;
        if let Err(ref e) = result {
            self.surface.notify(NoticeLevel::Error, &e.to_string());
        }
        result.map(Some)
    }

    async fn run(&mut self, submission: &Submission) -> Result<Completed, CheckError> {
        let kind = submission.kind;

        self.check_integrity(kind)?;
        let request = validate(submission)?;

        let original_label = self.surface.trigger_label(kind);
        self.state = RequestState::InFlight;
        self.surface.set_trigger(kind, false, BUSY_LABEL);

        let started = Instant::now();
        let outcome = self.dispatch(&request, kind).await;

        self.surface.set_trigger(kind, true, &original_label);

        match outcome {
            Ok(response) => {
                self.state = RequestState::Succeeded;
                let elapsed = started.elapsed();
                info!(
                    "Analysis finished in {:.1}s: {}",
                    elapsed.as_secs_f64(),
                    response.display_verdict()
                );

                let view = build_view(&response);
                self.surface.show_results(&view);

                Ok(Completed {
                    response,
                    view,
                    elapsed,
                })
            }
            Err(e) => {
                self.state = match e {
                    CheckError::Timeout { .. } => RequestState::TimedOut,
                    _ => RequestState::Failed,
                };
                Err(e)
            }
        }
    }

    fn check_integrity(&self, kind: SubmissionKind) -> Result<(), CheckError> {
        let missing: Vec<String> = required_roles(kind)
            .into_iter()
            .filter(|role| !self.surface.has_element(*role))
            .map(|role| role.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CheckError::PageIntegrity { missing })
        }
    }

    /// Call the backend under the cancellation timer.
    async fn dispatch(
        &self,
        request: &AnalysisRequest,
        kind: SubmissionKind,
    ) -> Result<AnalysisResponse, CheckError> {
        let cancel = CancellationToken::new();
        let timeout = self.config.timeout;

        let timer = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            })
        };

        let result = self.backend.check(request, kind, cancel).await;
        timer.abort();

        result.map_err(|e| self.map_backend_error(e))
    }

    fn map_backend_error(&self, error: BackendError) -> CheckError {
        match error {
            BackendError::Cancelled => {
                warn!("Analysis abandoned after {}s", self.config.timeout.as_secs());
                CheckError::Timeout {
                    after: self.config.timeout,
                }
            }
            BackendError::Status { status, message } => CheckError::Server {
                status,
                message: message.unwrap_or_else(|| generic_server_message(status)),
            },
            BackendError::Transport(message) => {
                warn!("Transport error: {}", message);
                CheckError::Transport { message }
            }
            BackendError::Parse(message) => {
                warn!("Unreadable response: {}", message);
                CheckError::Parse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::VerdictColor;
    use crate::error::ErrorKind;
    use crate::surface::ElementRole;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const IDLE_LABEL: &str = "Analyze with AI";

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Trigger { enabled: bool, label: String },
        Notice(NoticeLevel, String),
        Shown(ResultView),
    }

    struct FakeSurface {
        missing: HashSet<ElementRole>,
        enabled: bool,
        label: String,
        events: Vec<Event>,
    }

    impl FakeSurface {
        fn new() -> Self {
            Self {
                missing: HashSet::new(),
                enabled: true,
                label: IDLE_LABEL.to_string(),
                events: Vec::new(),
            }
        }

        fn notices(&self) -> Vec<String> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Notice(_, m) => Some(m.clone()),
                    _ => None,
                })
                .collect()
        }

        fn trigger_events(&self) -> Vec<(bool, String)> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Trigger { enabled, label } => Some((*enabled, label.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for FakeSurface {
        fn has_element(&self, role: ElementRole) -> bool {
            !self.missing.contains(&role)
        }

        fn trigger_enabled(&self, _kind: SubmissionKind) -> bool {
            self.enabled
        }

        fn trigger_label(&self, _kind: SubmissionKind) -> String {
            self.label.clone()
        }

        fn set_trigger(&mut self, _kind: SubmissionKind, enabled: bool, label: &str) {
            self.enabled = enabled;
            self.label = label.to_string();
            self.events.push(Event::Trigger {
                enabled,
                label: label.to_string(),
            });
        }

        fn notify(&mut self, level: NoticeLevel, message: &str) {
            self.events.push(Event::Notice(level, message.to_string()));
        }

        fn show_results(&mut self, view: &ResultView) {
            self.events.push(Event::Shown(view.clone()));
        }
    }

    #[derive(Clone)]
    enum Script {
        Respond(AnalysisResponse),
        Fail(BackendError),
        Hang,
    }

    struct FakeBackend {
        script: Script,
        calls: Arc<AtomicUsize>,
        last_token: Arc<Mutex<Option<CancellationToken>>>,
    }

    impl FakeBackend {
        fn new(script: Script) -> Self {
            Self {
                script,
                calls: Arc::new(AtomicUsize::new(0)),
                last_token: Arc::new(Mutex::new(None)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisBackend for FakeBackend {
        async fn check(
            &self,
            _request: &AnalysisRequest,
            _kind: SubmissionKind,
            cancel: CancellationToken,
        ) -> Result<AnalysisResponse, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_token.lock().unwrap() = Some(cancel.clone());

            match &self.script {
                Script::Respond(response) => Ok(response.clone()),
                Script::Fail(error) => Err(error.clone()),
                Script::Hang => {
                    cancel.cancelled().await;
                    Err(BackendError::Cancelled)
                }
            }
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }
    }

    fn make_controller(script: Script, timeout: Duration) -> AnalysisController<FakeBackend, FakeSurface> {
        AnalysisController::new(
            FakeBackend::new(script),
            FakeSurface::new(),
            ControllerConfig { timeout },
        )
    }

    fn false_response() -> AnalysisResponse {
        AnalysisResponse {
            overall_verdict: Some("FALSE".to_string()),
            summary: "Fabricated story.".to_string(),
            ..Default::default()
        }
    }

    fn assert_trigger_restored(surface: &FakeSurface) {
        assert_eq!(
            surface.trigger_events(),
            vec![
                (false, BUSY_LABEL.to_string()),
                (true, IDLE_LABEL.to_string())
            ]
        );
        assert!(surface.enabled);
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(
            validate(&Submission::text("   \n\t ")),
            Err(CheckError::validation("Please enter the news text"))
        );
        assert_eq!(
            validate(&Submission::text("  Big news  ")).unwrap().content,
            "Big news"
        );
    }

    #[test]
    fn test_validate_link() {
        assert_eq!(
            validate(&Submission::link("")),
            Err(CheckError::validation("Please enter a news URL"))
        );
        assert_eq!(
            validate(&Submission::link("news.example/story")),
            Err(CheckError::validation("Invalid URL format"))
        );
        assert_eq!(
            validate(&Submission::link(" https://news.example/story ")).unwrap().content,
            "https://news.example/story"
        );
    }

    #[test]
    fn test_submission_preview() {
        let long = Submission::text("word ".repeat(40));
        let preview = long.preview();
        assert!(preview.ends_with('…'));
        assert!(preview.chars().count() <= PREVIEW_CHARS + 1);

        assert_eq!(Submission::text(" line one\nline two ").preview(), "line one line two");
    }

    #[test]
    fn test_submission_from_line() {
        assert_eq!(
            Submission::from_line("  https://news.example/a "),
            Submission::link("https://news.example/a")
        );
        assert_eq!(
            Submission::from_line("Markets fell 4% today"),
            Submission::text("Markets fell 4% today")
        );
        assert_eq!(Submission::from_line("ftp://x").kind, SubmissionKind::Text);
    }

    #[tokio::test]
    async fn test_blank_text_never_calls_backend() {
        let mut controller = make_controller(Script::Respond(false_response()), DEFAULT_TIMEOUT);

        let err = controller.submit(Submission::text("   ")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(controller.backend().calls(), 0);
        assert_eq!(controller.state(), RequestState::Idle);
        assert_eq!(controller.surface().notices(), vec!["Please enter the news text"]);
        assert!(controller.surface().trigger_events().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_url_never_calls_backend() {
        let mut controller = make_controller(Script::Respond(false_response()), DEFAULT_TIMEOUT);

        let err = controller
            .submit(Submission::link("not a url"))
            .await
            .unwrap_err();
        assert_eq!(err, CheckError::validation("Invalid URL format"));
        assert_eq!(controller.backend().calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_elements_fail_before_network() {
        let mut controller = make_controller(Script::Respond(false_response()), DEFAULT_TIMEOUT);
        controller.surface.missing.insert(ElementRole::VerdictDisplay);

        let err = controller
            .submit(Submission::text("Real text"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PageIntegrity);
        assert!(err.to_string().contains("verdict display"));
        assert_eq!(controller.backend().calls(), 0);
    }

    #[tokio::test]
    async fn test_success_renders_and_restores_trigger() {
        let mut controller = make_controller(Script::Respond(false_response()), DEFAULT_TIMEOUT);

        let completed = controller
            .submit(Submission::text("Aliens built the pyramids"))
            .await
            .unwrap()
            .expect("cycle should run");

        assert_eq!(controller.state(), RequestState::Succeeded);
        assert_eq!(completed.view.verdict.color, VerdictColor::Red);
        assert_eq!(controller.backend().calls(), 1);
        assert_trigger_restored(controller.surface());
        assert!(controller
            .surface()
            .events
            .iter()
            .any(|e| matches!(e, Event::Shown(v) if v.summary == "Fabricated story.")));
        assert!(controller.surface().notices().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_aborts_and_reenables_trigger() {
        let mut controller = make_controller(Script::Hang, Duration::from_millis(50));

        let err = controller
            .submit(Submission::text("Slow story"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(controller.state(), RequestState::TimedOut);
        assert_trigger_restored(controller.surface());
        assert_eq!(
            controller.surface().notices(),
            vec!["The analysis timed out after 0 seconds. Please try again."]
        );
    }

    #[tokio::test]
    async fn test_timer_is_cancelled_after_response() {
        let mut controller = make_controller(
            Script::Respond(false_response()),
            Duration::from_millis(30),
        );

        controller
            .submit(Submission::text("Quick story"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let token = controller.backend().last_token.lock().unwrap().clone().unwrap();
        assert!(!token.is_cancelled());
        assert_eq!(controller.state(), RequestState::Succeeded);
    }

    #[tokio::test]
    async fn test_server_error_message_or_fallback() {
        let mut controller = make_controller(
            Script::Fail(BackendError::Status {
                status: 400,
                message: Some("No content provided in the request.".to_string()),
            }),
            DEFAULT_TIMEOUT,
        );
        let err = controller.submit(Submission::text("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "No content provided in the request.");
        assert_eq!(controller.state(), RequestState::Failed);
        assert_trigger_restored(controller.surface());

        let mut controller = make_controller(
            Script::Fail(BackendError::Status {
                status: 502,
                message: None,
            }),
            DEFAULT_TIMEOUT,
        );
        let err = controller.submit(Submission::text("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "Server returned an error (HTTP 502)");
    }

    #[tokio::test]
    async fn test_parse_failure_ends_failed() {
        let mut controller = make_controller(
            Script::Fail(BackendError::Parse("expected value at line 1".to_string())),
            DEFAULT_TIMEOUT,
        );

        let err = controller.submit(Submission::text("x")).await.unwrap_err();
        assert!(matches!(err, CheckError::Parse { .. }));
        assert_eq!(controller.state(), RequestState::Failed);
        assert_trigger_restored(controller.surface());
    }

    #[tokio::test]
    async fn test_disabled_trigger_is_inert() {
        let mut controller = make_controller(Script::Respond(false_response()), DEFAULT_TIMEOUT);
        controller.surface.enabled = false;

        let outcome = controller.submit(Submission::text("Story")).await;
        assert_eq!(outcome.map(|c| c.is_none()), Ok(true));
        assert_eq!(controller.backend().calls(), 0);
        assert!(controller.surface().events.is_empty());
    }

    #[tokio::test]
    async fn test_retrigger_after_completion_runs_again() {
        let mut controller = make_controller(
            Script::Fail(BackendError::Transport("connection refused".to_string())),
            DEFAULT_TIMEOUT,
        );

        assert!(controller.submit(Submission::text("first")).await.is_err());
        assert_eq!(controller.state(), RequestState::Failed);

        controller.backend.script = Script::Respond(false_response());
        let second = controller.submit(Submission::text("second")).await.unwrap();
        assert!(second.is_some());
        assert_eq!(controller.state(), RequestState::Succeeded);
        assert_eq!(controller.backend().calls(), 2);
        assert_eq!(controller.surface().trigger_events().len(), 4);
    }
}
