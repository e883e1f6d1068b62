use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Успешный ответ сервиса (HTTP 2xx). Поля могут отсутствовать:
/// превью показывается, только если `html_preview` непустой
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// HTML-превью документа. Доверенная разметка: вставляется без экранирования
    #[serde(default)]
    pub html_preview: Option<String>,
    /// Ссылка на готовый .docx (presigned URL)
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Тело ответа с ошибкой (не-2xx). `error` может отсутствовать или быть не строкой
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
}

impl GenerateErrorBody {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            error: Some(Value::String(message.into())),
        }
    }

    /// Текст ошибки для пользователя. Ложные значения (`null`, `false`, `0`, `""`)
    /// считаются отсутствием сообщения, остальные приводятся к строке
    pub fn message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            value => Some(display_value(value)),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
