/// Тело запроса к сервису генерации.
///
/// Сервис ожидает в теле POST голую Base64-строку с содержимым JSON-файла,
/// без JSON-обёртки, хотя заголовок запроса `Content-Type: application/json`.
/// Формат менять нельзя: его разбирает удалённая сторона.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    payload: String,
}

impl GenerateRequest {
    /// Content-Type, с которым отправляется запрос
    pub const CONTENT_TYPE: &'static str = "application/json";

    pub fn new(base64_payload: impl Into<String>) -> Self {
        Self {
            payload: base64_payload.into(),
        }
    }

    /// Текст, который уходит в теле запроса как есть
    pub fn body(&self) -> &str {
        &self.payload
    }

    pub fn into_body(self) -> String {
        self.payload
    }
}
