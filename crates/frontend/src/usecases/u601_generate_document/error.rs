use contracts::usecases::u601_generate_document::GenerateErrorBody;

pub const MSG_WRONG_MEDIA_TYPE: &str = "file must be of JSON type";
pub const MSG_NO_FILE: &str = "please select a .json file";
pub const MSG_READ_FAILED: &str = "could not read local file";
pub const MSG_SERVER_FALLBACK: &str = "an error occurred on the server";

/// Ошибки страницы генерации. `Display` — ровно тот текст, что видит пользователь
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// Нарушено локальное предусловие; сеть не трогаем
    #[error("{0}")]
    Validation(String),
    /// Не удалось прочитать локальный файл
    #[error("{0}")]
    Io(String),
    /// Сервис ответил не-2xx
    #[error("{0}")]
    Server(String),
    /// Обрыв связи, битый JSON в ответе и т.п.
    #[error("{0}")]
    Network(String),
    /// Сбой до начала чтения файла
    #[error("{0}")]
    Unexpected(String),
}

impl GenerateError {
    pub fn wrong_media_type() -> Self {
        Self::Validation(MSG_WRONG_MEDIA_TYPE.to_string())
    }

    pub fn no_file() -> Self {
        Self::Validation(MSG_NO_FILE.to_string())
    }

    pub fn read_failed() -> Self {
        Self::Io(MSG_READ_FAILED.to_string())
    }

    /// Без осмысленного `error` в теле — общее сообщение
    pub fn from_server_body(body: GenerateErrorBody) -> Self {
        let message = body
            .message()
            .unwrap_or_else(|| MSG_SERVER_FALLBACK.to_string());
        Self::Server(message)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Io(_) => "io",
            Self::Server(_) => "server",
            Self::Network(_) => "network",
            Self::Unexpected(_) => "unexpected",
        }
    }
}
