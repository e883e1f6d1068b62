//! u601 Generate Document - View Model
//!
//! Состояние страницы — неизменяемый снимок `GenerateState`. Каждое событие
//! (`Action`) порождает новый снимок через `reduce`. Конвейер `submit` идёт
//! линейно: чтение файла, кодирование, один POST, публикация результата.

use contracts::usecases::u601_generate_document::JSON_MEDIA_TYPE;
use leptos::prelude::*;
use uuid::Uuid;

use super::error::GenerateError;
use super::model::{self, FileSource, GenerationClient, GenerationResult};

pub const FILE_PLACEHOLDER: &str = "No file selected";

/// Идентификатор одной попытки отправки
pub type AttemptId = Uuid;

/// Фаза текущей попытки: Idle → Validating → Reading → Encoding → Requesting → Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Reading,
    Encoding,
    Requesting,
}

#[derive(Debug, Clone)]
pub struct GenerateState<F> {
    pub selected: Option<F>,
    pub file_name: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub result: Option<GenerationResult>,
    pub attempt: Option<AttemptId>,
    pub phase: SubmissionPhase,
}

impl<F> Default for GenerateState<F> {
    fn default() -> Self {
        Self {
            selected: None,
            file_name: FILE_PLACEHOLDER.to_string(),
            is_loading: false,
            error: None,
            result: None,
            attempt: None,
            phase: SubmissionPhase::Idle,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action<F> {
    FileSelected(F),
    FileCleared,
    ValidationFailed(GenerateError),
    SubmitStarted(AttemptId),
    ReadSucceeded(AttemptId),
    ReadFailed(AttemptId, GenerateError),
    /// `None` — сервис ответил 2xx без превью
    RequestSucceeded(AttemptId, Option<GenerationResult>),
    RequestFailed(AttemptId, GenerateError),
}

impl<F: FileSource> GenerateState<F> {
    pub fn reduce(self, action: Action<F>) -> Self {
        match action {
            Action::FileSelected(file) => Self {
                file_name: file.name(),
                selected: Some(file),
                error: None,
                ..self
            },
            Action::FileCleared => Self {
                selected: None,
                file_name: FILE_PLACEHOLDER.to_string(),
                ..self
            },
            Action::ValidationFailed(err) => Self {
                selected: None,
                file_name: FILE_PLACEHOLDER.to_string(),
                error: Some(err.to_string()),
                ..self
            },
            // Результат прошлой попытки очищается при старте и не восстанавливается
            Action::SubmitStarted(attempt) => Self {
                is_loading: true,
                error: None,
                result: None,
                attempt: Some(attempt),
                phase: SubmissionPhase::Reading,
                ..self
            },
            Action::ReadSucceeded(attempt) if self.is_current(attempt) => Self {
                phase: SubmissionPhase::Requesting,
                ..self
            },
            Action::RequestSucceeded(attempt, result) if self.is_current(attempt) => Self {
                result,
                error: None,
                ..self.settled()
            },
            Action::ReadFailed(attempt, err) | Action::RequestFailed(attempt, err)
                if self.is_current(attempt) =>
            {
                Self {
                    error: Some(err.to_string()),
                    ..self.settled()
                }
            }
            Action::ReadSucceeded(attempt)
            | Action::ReadFailed(attempt, _)
            | Action::RequestSucceeded(attempt, _)
            | Action::RequestFailed(attempt, _) => {
                log::debug!("u601: ignoring settlement of stale attempt {}", attempt);
                self
            }
        }
    }

    fn is_current(&self, attempt: AttemptId) -> bool {
        self.attempt == Some(attempt)
    }

    fn settled(self) -> Self {
        Self {
            is_loading: false,
            attempt: None,
            phase: SubmissionPhase::Idle,
            ..self
        }
    }
}

/// Хранилище снимков состояния
pub trait StateStore {
    type File: FileSource;

    fn snapshot(&self) -> GenerateState<Self::File>;
    fn dispatch(&self, action: Action<Self::File>);
}

impl<F: FileSource> StateStore for RwSignal<GenerateState<F>, LocalStorage> {
    type File = F;

    fn snapshot(&self) -> GenerateState<F> {
        self.get_untracked()
    }

    fn dispatch(&self, action: Action<F>) {
        self.update(|state| {
            let prev = std::mem::take(state);
            *state = prev.reduce(action);
        });
    }
}

/// Событие выбора файла. `None` — пользователь закрыл диалог без выбора
pub fn select_file<F: FileSource>(file: Option<F>) -> Action<F> {
    match file {
        None => Action::FileCleared,
        Some(file) if file.media_type() != JSON_MEDIA_TYPE => {
            log::warn!(
                "u601: rejected {} with media type '{}'",
                file.name(),
                file.media_type()
            );
            Action::ValidationFailed(GenerateError::wrong_media_type())
        }
        Some(file) => Action::FileSelected(file),
    }
}

/// Отправить выбранный файл на генерацию.
///
/// Пока идёт предыдущая попытка, новая отклоняется без изменения состояния.
/// Флаг загрузки снимается на любом выходе после `SubmitStarted`.
pub async fn submit<S, C>(store: &S, client: &C)
where
    S: StateStore,
    C: GenerationClient,
{
    let state = store.snapshot();
    log::debug!("u601: phase {:?}", SubmissionPhase::Validating);

    if state.is_loading {
        log::warn!("u601: submit ignored, a document is already being generated");
        return;
    }

    let Some(file) = state.selected else {
        store.dispatch(Action::ValidationFailed(GenerateError::no_file()));
        return;
    };

    let attempt = Uuid::new_v4();
    log::info!("u601: attempt {} started for {}", attempt, file.name());
    store.dispatch(Action::SubmitStarted(attempt));

    let request = match model::build_request(&file).await {
        Ok(request) => request,
        Err(err) => {
            log::error!("u601: attempt {} failed reading file: {}", attempt, err);
            store.dispatch(Action::ReadFailed(attempt, err));
            return;
        }
    };
    log::debug!("u601: phase {:?}", SubmissionPhase::Encoding);
    store.dispatch(Action::ReadSucceeded(attempt));

    match client.post(request).await.and_then(model::interpret_response) {
        Ok(result) => {
            log::info!("u601: attempt {} succeeded", attempt);
            store.dispatch(Action::RequestSucceeded(attempt, result));
        }
        Err(err) => {
            log::error!("u601: attempt {} failed ({}): {}", attempt, err.kind(), err);
            store.dispatch(Action::RequestFailed(attempt, err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_uri;
    use crate::usecases::u601_generate_document::error::{
        MSG_NO_FILE, MSG_READ_FAILED, MSG_SERVER_FALLBACK, MSG_WRONG_MEDIA_TYPE,
    };
    use crate::usecases::u601_generate_document::model::RawResponse;
    use contracts::usecases::u601_generate_document::GenerateRequest;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone)]
    struct FakeFile {
        name: &'static str,
        media_type: &'static str,
        contents: Result<Vec<u8>, GenerateError>,
    }

    impl FakeFile {
        fn json(name: &'static str, contents: &str) -> Self {
            Self {
                name,
                media_type: "application/json",
                contents: Ok(contents.as_bytes().to_vec()),
            }
        }
    }

    impl FileSource for FakeFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn media_type(&self) -> String {
            self.media_type.to_string()
        }

        async fn read_data_uri(&self) -> Result<String, GenerateError> {
            let bytes = self.contents.clone()?;
            Ok(data_uri::encode(self.media_type, &bytes))
        }
    }

    /// Хранилище для тестов: запоминает флаг загрузки после каждого события
    #[derive(Default)]
    struct TestStore {
        state: RefCell<GenerateState<FakeFile>>,
        loading_history: RefCell<Vec<bool>>,
    }

    impl StateStore for TestStore {
        type File = FakeFile;

        fn snapshot(&self) -> GenerateState<FakeFile> {
            self.state.borrow().clone()
        }

        fn dispatch(&self, action: Action<FakeFile>) {
            let prev = self.state.take();
            let next = prev.reduce(action);
            self.loading_history.borrow_mut().push(next.is_loading);
            *self.state.borrow_mut() = next;
        }
    }

    impl TestStore {
        fn with_file(file: FakeFile) -> Self {
            let store = Self::default();
            store.dispatch(select_file(Some(file)));
            store.loading_history.borrow_mut().clear();
            store
        }
    }

    struct FakeClient {
        response: Result<RawResponse, GenerateError>,
        calls: Cell<usize>,
        last_body: RefCell<Option<String>>,
    }

    impl FakeClient {
        fn replying(status: u16, body: &str) -> Self {
            Self::new(Ok(RawResponse {
                status,
                body: body.to_string(),
            }))
        }

        fn new(response: Result<RawResponse, GenerateError>) -> Self {
            Self {
                response,
                calls: Cell::new(0),
                last_body: RefCell::new(None),
            }
        }
    }

    impl GenerationClient for FakeClient {
        async fn post(&self, request: GenerateRequest) -> Result<RawResponse, GenerateError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_body.borrow_mut() = Some(request.into_body());
            self.response.clone()
        }
    }

    const OK_BODY: &str = r#"{"html_preview": "<p>ok</p>", "download_url": "https://x/out.docx"}"#;

    fn ok_result() -> GenerationResult {
        GenerationResult {
            html_preview: "<p>ok</p>".to_string(),
            download_url: Some("https://x/out.docx".to_string()),
        }
    }

    #[test]
    fn test_select_non_json_file() {
        let store = TestStore::with_file(FakeFile::json("old.json", "{}"));
        store.dispatch(select_file(Some(FakeFile {
            name: "status.txt",
            media_type: "text/plain",
            contents: Ok(b"hello".to_vec()),
        })));

        let state = store.snapshot();
        assert!(state.selected.is_none());
        assert_eq!(state.file_name, FILE_PLACEHOLDER);
        assert_eq!(state.error.as_deref(), Some(MSG_WRONG_MEDIA_TYPE));

        let client = FakeClient::replying(200, OK_BODY);
        block_on(submit(&store, &client));
        assert_eq!(client.calls.get(), 0);
        assert_eq!(store.snapshot().error.as_deref(), Some(MSG_NO_FILE));
    }

    #[test]
    fn test_media_type_must_match_exactly() {
        for media_type in ["", "text/json", "application/json; charset=utf-8", "APPLICATION/JSON"] {
            let file = FakeFile {
                name: "status.json",
                media_type,
                contents: Ok(Vec::new()),
            };
            assert!(
                matches!(select_file(Some(file)), Action::ValidationFailed(_)),
                "media type '{}' should be rejected",
                media_type
            );
        }
    }

    #[test]
    fn test_select_valid_file_clears_error() {
        let store = TestStore::default();
        store.dispatch(Action::ValidationFailed(GenerateError::no_file()));
        store.dispatch(select_file(Some(FakeFile::json("status.json", "{}"))));

        let state = store.snapshot();
        assert_eq!(state.file_name, "status.json");
        assert!(state.selected.is_some());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_cancel_selection_is_not_an_error() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
        store.dispatch(select_file(None));

        let state = store.snapshot();
        assert!(state.selected.is_none());
        assert_eq!(state.file_name, FILE_PLACEHOLDER);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_submit_without_file() {
        let store = TestStore::default();
        let client = FakeClient::replying(200, OK_BODY);

        block_on(submit(&store, &client));

        assert_eq!(client.calls.get(), 0);
        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some(MSG_NO_FILE));
        assert!(!state.is_loading);
        assert_eq!(*store.loading_history.borrow(), vec![false]);
    }

    #[test]
    fn test_submit_success() {
        let store = TestStore::with_file(FakeFile::json("status.json", r#"{"a":1}"#));
        let client = FakeClient::replying(200, OK_BODY);

        block_on(submit(&store, &client));

        assert_eq!(client.calls.get(), 1);
        assert_eq!(client.last_body.borrow().as_deref(), Some("eyJhIjoxfQ=="));

        let state = store.snapshot();
        assert_eq!(state.result, Some(ok_result()));
        assert!(state.error.is_none());
        assert!(!state.is_loading);
        assert!(state.attempt.is_none());
        assert_eq!(state.phase, SubmissionPhase::Idle);
        // SubmitStarted, ReadSucceeded, RequestSucceeded
        assert_eq!(*store.loading_history.borrow(), vec![true, true, false]);
    }

    #[test]
    fn test_submit_success_without_preview() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
        let client = FakeClient::replying(200, r#"{"download_url": "https://x/out.docx"}"#);

        block_on(submit(&store, &client));

        let state = store.snapshot();
        assert!(state.result.is_none());
        assert!(state.error.is_none());
        assert!(!state.is_loading);
        assert_eq!(*store.loading_history.borrow(), vec![true, true, false]);
    }

    #[test]
    fn test_submit_server_error_with_message() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
        let client = FakeClient::replying(500, r#"{"error": "bad input"}"#);

        block_on(submit(&store, &client));

        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some("bad input"));
        assert!(state.result.is_none());
        assert!(!state.is_loading);
        assert_eq!(*store.loading_history.borrow(), vec![true, true, false]);
    }

    #[test]
    fn test_submit_server_error_without_message() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
        let client = FakeClient::replying(500, "{}");

        block_on(submit(&store, &client));

        assert_eq!(store.snapshot().error.as_deref(), Some(MSG_SERVER_FALLBACK));
    }

    #[test]
    fn test_read_failure_skips_request() {
        let store = TestStore::with_file(FakeFile {
            name: "status.json",
            media_type: "application/json",
            contents: Err(GenerateError::read_failed()),
        });
        let client = FakeClient::replying(200, OK_BODY);

        block_on(submit(&store, &client));

        assert_eq!(client.calls.get(), 0);
        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some(MSG_READ_FAILED));
        assert!(!state.is_loading);
        assert_eq!(*store.loading_history.borrow(), vec![true, false]);
    }

    #[test]
    fn test_failure_before_read_uses_underlying_message() {
        let store = TestStore::with_file(FakeFile {
            name: "status.json",
            media_type: "application/json",
            contents: Err(GenerateError::Unexpected("FileReader is not defined".to_string())),
        });
        let client = FakeClient::replying(200, OK_BODY);

        block_on(submit(&store, &client));

        assert_eq!(client.calls.get(), 0);
        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some("FileReader is not defined"));
        assert!(!state.is_loading);
    }

    #[test]
    fn test_network_and_parse_failures_clear_loading() {
        let cases = [
            FakeClient::new(Err(GenerateError::Network("Request failed: offline".to_string()))),
            FakeClient::replying(200, "not json"),
            FakeClient::replying(503, "<html></html>"),
        ];

        for client in cases {
            let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
            block_on(submit(&store, &client));

            let state = store.snapshot();
            assert!(!state.is_loading);
            assert!(state.error.is_some());
            assert!(state.result.is_none());
            assert_eq!(*store.loading_history.borrow(), vec![true, true, false]);
        }
    }

    #[test]
    fn test_sequential_submissions_are_isolated() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));

        block_on(submit(&store, &FakeClient::replying(500, r#"{"error": "bad input"}"#)));
        assert_eq!(store.snapshot().error.as_deref(), Some("bad input"));

        block_on(submit(&store, &FakeClient::replying(200, OK_BODY)));
        let state = store.snapshot();
        assert!(state.error.is_none());
        assert_eq!(state.result, Some(ok_result()));

        // Ошибка после успеха не возвращает старый результат
        block_on(submit(&store, &FakeClient::replying(500, "{}")));
        let state = store.snapshot();
        assert!(state.result.is_none());
        assert_eq!(state.error.as_deref(), Some(MSG_SERVER_FALLBACK));
        assert!(state.selected.is_some());
    }

    #[test]
    fn test_submit_rejected_while_in_flight() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
        let running = Uuid::new_v4();
        store.dispatch(Action::SubmitStarted(running));
        let client = FakeClient::replying(200, OK_BODY);

        block_on(submit(&store, &client));

        assert_eq!(client.calls.get(), 0);
        let state = store.snapshot();
        assert!(state.is_loading);
        assert_eq!(state.attempt, Some(running));
    }

    #[test]
    fn test_stale_settlement_is_ignored() {
        let store = TestStore::with_file(FakeFile::json("status.json", "{}"));
        let stale = Uuid::new_v4();
        let current = Uuid::new_v4();
        store.dispatch(Action::SubmitStarted(stale));
        store.dispatch(Action::SubmitStarted(current));

        store.dispatch(Action::RequestSucceeded(stale, Some(ok_result())));
        store.dispatch(Action::ReadFailed(stale, GenerateError::read_failed()));

        let state = store.snapshot();
        assert!(state.is_loading);
        assert!(state.result.is_none());
        assert!(state.error.is_none());

        store.dispatch(Action::RequestFailed(current, GenerateError::Server("bad input".into())));
        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("bad input"));
    }

    #[test]
    fn test_submit_started_clears_previous_outcome() {
        let state = GenerateState::<FakeFile> {
            error: Some("old".to_string()),
            result: Some(ok_result()),
            ..Default::default()
        };
        let state = state.reduce(Action::SubmitStarted(Uuid::new_v4()));
        assert!(state.is_loading);
        assert!(state.error.is_none());
        assert!(state.result.is_none());
        assert_eq!(state.phase, SubmissionPhase::Reading);
    }
}
